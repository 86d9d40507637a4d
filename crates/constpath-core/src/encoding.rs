//! Source-encoding tags.
//!
//! Names are produced as plain Rust strings, but the runtime they serve tags
//! every string with the encoding of the source it came from. A computed name
//! carries the tag of the entity it names, so the encoding a class was defined
//! in survives into `name`.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Text encoding recorded at an entity's definition site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Encoding {
    #[default]
    Utf8 = 0,
    UsAscii = 1,
    /// Raw bytes, also known as `BINARY`.
    Ascii8Bit = 2,
    Iso8859_1 = 3,
    ShiftJis = 4,
    EucJp = 5,
}

impl Encoding {
    /// Every known encoding, in tag order.
    pub const ALL: [Encoding; 6] = [
        Encoding::Utf8,
        Encoding::UsAscii,
        Encoding::Ascii8Bit,
        Encoding::Iso8859_1,
        Encoding::ShiftJis,
        Encoding::EucJp,
    ];

    /// Canonical label, as the runtime reports it.
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::UsAscii => "US-ASCII",
            Encoding::Ascii8Bit => "ASCII-8BIT",
            Encoding::Iso8859_1 => "ISO-8859-1",
            Encoding::ShiftJis => "Shift_JIS",
            Encoding::EucJp => "EUC-JP",
        }
    }

    /// Look up an encoding by label, ignoring ASCII case.
    ///
    /// Accepts the canonical labels plus the common aliases `BINARY`,
    /// `ASCII`, `SJIS` and `UTF8`.
    pub fn from_label(label: &str) -> Option<Self> {
        if let Some(found) = Self::ALL
            .iter()
            .copied()
            .find(|enc| enc.as_str().eq_ignore_ascii_case(label))
        {
            return Some(found);
        }
        match label.to_ascii_uppercase().as_str() {
            "BINARY" => Some(Encoding::Ascii8Bit),
            "ASCII" => Some(Encoding::UsAscii),
            "SJIS" => Some(Encoding::ShiftJis),
            "UTF8" => Some(Encoding::Utf8),
            _ => None,
        }
    }

    /// Check if every valid string in this encoding is 7-bit.
    pub fn is_ascii_only(self) -> bool {
        matches!(self, Encoding::UsAscii)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
