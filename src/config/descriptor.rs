use crate::core::service::ServiceInfo;
use crate::utils::error::{Result, SchemaError};
use regex::{Captures, Regex};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Yaml,
    Json,
    Toml,
}

impl DescriptorFormat {
    /// 依副檔名判斷格式
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse().map_err(|_| SchemaError::DescriptorFormat {
            format: "unknown".to_string(),
            message: format!(
                "Cannot infer descriptor format of '{}'. Supported extensions: yaml, yml, json, toml",
                path.display()
            ),
        })
    }
}

impl FromStr for DescriptorFormat {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DescriptorFormat::Yaml),
            "json" => Ok(DescriptorFormat::Json),
            "toml" => Ok(DescriptorFormat::Toml),
            other => Err(SchemaError::UnknownEnumerationValue {
                enumeration: "descriptor format",
                value: other.to_string(),
                expected: vec!["yaml", "json", "toml"],
            }),
        }
    }
}

impl fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DescriptorFormat::Yaml => "YAML",
            DescriptorFormat::Json => "JSON",
            DescriptorFormat::Toml => "TOML",
        })
    }
}

/// 替換環境變數 (例如 ${TEAM_NAME})，未設定的變數保持原樣
pub fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

/// 從字串解析描述檔，根節點必須是 mapping
pub fn parse_descriptor(content: &str, format: DescriptorFormat) -> Result<Value> {
    let content = substitute_env_vars(content);
    let format_error = |message: String| SchemaError::DescriptorFormat {
        format: format.to_string(),
        message,
    };

    let value: Value = match format {
        DescriptorFormat::Yaml => {
            serde_yaml::from_str(&content).map_err(|e| format_error(e.to_string()))?
        }
        DescriptorFormat::Json => {
            serde_json::from_str(&content).map_err(|e| format_error(e.to_string()))?
        }
        DescriptorFormat::Toml => {
            toml::from_str(&content).map_err(|e| format_error(e.to_string()))?
        }
    };

    if !value.is_object() {
        return Err(format_error("Descriptor root must be a mapping".to_string()));
    }
    Ok(value)
}

/// 從檔案載入描述檔
pub fn load_descriptor<P: AsRef<Path>>(path: P, format: Option<DescriptorFormat>) -> Result<Value> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => DescriptorFormat::from_path(path)?,
    };
    let content = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), %format, "loading service descriptor");
    parse_descriptor(&content, format)
}

/// 載入並驗證整個服務描述
pub fn load_service<P: AsRef<Path>>(path: P, format: Option<DescriptorFormat>) -> Result<ServiceInfo> {
    let value = load_descriptor(path, format)?;
    ServiceInfo::from_value(&value)
}
