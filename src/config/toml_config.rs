use crate::schema::{GenerateOptions, DEFAULT_MODULE};
use crate::utils::error::{MiddleError, Result};
use crate::utils::validation::{validate_identifier, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub schema: SchemaSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSection {
    pub module: Option<String>,
    pub root: Option<String>,
    pub strict: Option<bool>,
    pub pretty: Option<bool>,
}

impl SchemaConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MiddleError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ROOT_TYPE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MiddleError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(module) = &self.schema.module {
            validate_identifier("schema.module", module)?;
        }
        if let Some(root) = &self.schema.root {
            validate_identifier("schema.root", root)?;
        }
        Ok(())
    }

    pub fn module(&self) -> &str {
        self.schema.module.as_deref().unwrap_or(DEFAULT_MODULE)
    }

    pub fn root(&self) -> Option<&str> {
        self.schema.root.as_deref()
    }

    /// 有無法對映的宣告時是否視為錯誤
    pub fn strict(&self) -> bool {
        self.schema.strict.unwrap_or(false)
    }

    pub fn pretty(&self) -> bool {
        self.schema.pretty.unwrap_or(true)
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            module: self.module().to_string(),
            root: self.root().map(str::to_string),
        }
    }
}

impl Validate for SchemaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
