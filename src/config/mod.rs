pub mod toml_config;

pub use toml_config::SchemaConfig;

use crate::schema::GenerateOptions;

#[cfg(feature = "cli")]
use crate::utils::error::{MiddleError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_identifier, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "middle-c")]
#[command(about = "Generate JSON Schema for the declared C records")]
pub struct CliConfig {
    #[arg(short, long, help = "TOML file with a [schema] table")]
    pub config: Option<String>,

    #[arg(short, long, help = "Record to render (name, typedef or title)")]
    pub root: Option<String>,

    #[arg(short, long, help = "Title used when no single record is rendered")]
    pub module: Option<String>,

    #[arg(long, help = "Fail if any declaration cannot be mapped")]
    pub strict: bool,

    #[arg(long, help = "Render every record under `definitions`")]
    pub all: bool,

    #[arg(long, help = "List declared records and functions instead")]
    pub list: bool,

    #[arg(long, help = "Print compact JSON")]
    pub compact: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// Command-line values layered over the optional TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: GenerateOptions,
    pub strict: bool,
    pub pretty: bool,
    pub all: bool,
    pub list: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!(path = %path, "loading config file");
                let config = SchemaConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => SchemaConfig::default(),
        };

        let mut options = file.generate_options();
        if let Some(module) = &self.module {
            options.module = module.clone();
        }
        if self.root.is_some() {
            options.root = self.root.clone();
        }

        if self.all {
            if let Some(root) = &options.root {
                return Err(MiddleError::ConfigValidationError {
                    field: "all".to_string(),
                    message: format!("--all renders every record and cannot take root '{}'", root),
                });
            }
        }

        Ok(Settings {
            options,
            strict: self.strict || file.strict(),
            pretty: !self.compact && file.pretty(),
            all: self.all,
            list: self.list,
        })
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(module) = &self.module {
            validate_identifier("module", module)?;
        }
        if let Some(root) = &self.root {
            validate_identifier("root", root)?;
        }
        Ok(())
    }
}
