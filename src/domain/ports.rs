use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashMap;

/// How a use case is exposed in the implementing codebase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum CodeArtifact {
    /// A module-level callable instance.
    Object { var_name: String },
    Class { class_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseCaseCodeInfo {
    pub name: String,
    pub docs: Option<String>,
    pub module: Option<String>,
    #[serde(flatten)]
    pub artifact: CodeArtifact,
}

/// Source-code inspector that discovers use case implementations. This crate
/// only defines the contract; the descriptor parser never calls it.
pub trait UseCaseInspector {
    fn extract_use_case_code_metadata(&self, module_path: &str) -> Result<HashMap<String, UseCaseCodeInfo>>;
}

/// Result of correlating declared use cases with discovered implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UseCaseCoverage {
    /// Declared and implemented, in declaration order.
    pub matched: Vec<String>,
    /// Declared but missing from the code, in declaration order.
    pub declared_only: Vec<String>,
    /// Implemented but not declared, sorted.
    pub implemented_only: Vec<String>,
}

impl UseCaseCoverage {
    pub fn is_complete(&self) -> bool {
        self.declared_only.is_empty() && self.implemented_only.is_empty()
    }
}
