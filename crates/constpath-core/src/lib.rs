//! Core data types for constant-path naming.
//!
//! This crate holds the leaf types shared by the registry and its users:
//! entity and object identifiers, constant values, encoding tags, the frozen
//! [`ModuleName`] handle, the lexical rules for constant names, and the error
//! types.

mod encoding;
mod error;
mod ident;
mod ids;
mod name;
mod value;

pub use encoding::Encoding;
pub use error::{ConstantError, ConstpathError, NamingError};
pub use ident::{is_constant_name, is_constant_path, split_constant_path};
pub use ids::{EntityId, ObjectId};
pub use name::{ModuleName, PATH_SEPARATOR};
pub use value::Value;
