use constpath_core::Encoding;

/// Registry configuration.
///
/// # Example
///
/// ```
/// use constpath_core::Encoding;
/// use constpath_registry::RegistryConfig;
///
/// let config = RegistryConfig::default()
///     .with_root_name("Kernel")
///     .with_default_encoding(Encoding::UsAscii);
/// assert_eq!(config.root_name, "Kernel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Permanent name of the global root namespace.
    pub root_name: String,
    /// Encoding given to entities created without an explicit one.
    pub default_encoding: Encoding,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root_name: "Object".to_string(),
            default_encoding: Encoding::Utf8,
        }
    }
}

impl RegistryConfig {
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    pub fn with_default_encoding(mut self, encoding: Encoding) -> Self {
        self.default_encoding = encoding;
        self
    }
}
