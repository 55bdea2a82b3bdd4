pub mod config;
pub mod decls;
pub mod ffi;
pub mod schema;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{SchemaConfig, Settings};
pub use decls::{Car, Ivec, MyRec, MyStruct, TypeWrapper};
pub use schema::{generate, generate_all, generate_strict, Catalog, GenerateOptions, SchemaOutput};
pub use utils::error::{MiddleError, Result};
