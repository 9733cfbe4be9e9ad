use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codegen::GeneratorOptions;
use crate::codegen::translate::{DEFAULT_ENTRY_POINT, DEFAULT_PLACEHOLDER_TYPE, builtin_type_names};
use crate::diagnostics::TranspileError;

pub const CONFIG_FILE_NAME: &str = "saika.toml";

/// Project settings read from `saika.toml`. Every key is optional.
///
/// ```toml
/// [codegen]
/// placeholder_type = "any"
/// entry_point = "主"
///
/// [codegen.types]
/// "數字" = "int"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub codegen: CodegenConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    pub placeholder_type: String,
    pub entry_point: String,
    /// Extra type-name translations, merged over the built-in table.
    pub types: BTreeMap<String, String>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            placeholder_type: DEFAULT_PLACEHOLDER_TYPE.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            types: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, TranspileError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| TranspileError::config(format!("invalid syntax: {e}"), path))?;
        config.validate(path)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, TranspileError> {
        let content = std::fs::read_to_string(path).map_err(|e| TranspileError::io(path, e))?;
        Self::from_toml(&content, path)
    }

    /// Walk from `start_dir` up to a `.git` boundary or the filesystem root,
    /// loading the first `saika.toml` found.
    pub fn discover(start_dir: &Path) -> Result<Option<Self>, TranspileError> {
        match find_config_walk(start_dir) {
            Some(path) => Self::load(&path).map(Some),
            None => Ok(None),
        }
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        let mut type_names = builtin_type_names();
        type_names.extend(self.codegen.types.iter().map(|(k, v)| (k.clone(), v.clone())));
        GeneratorOptions {
            placeholder_type: self.codegen.placeholder_type.clone(),
            entry_point: self.codegen.entry_point.clone(),
            type_names,
        }
    }

    fn validate(&self, path: &Path) -> Result<(), TranspileError> {
        if self.codegen.placeholder_type.trim().is_empty() {
            return Err(TranspileError::config("codegen.placeholder_type must not be empty", path));
        }
        if self.codegen.entry_point.trim().is_empty() {
            return Err(TranspileError::config("codegen.entry_point must not be empty", path));
        }
        for (from, to) in &self.codegen.types {
            if to.trim().is_empty() {
                return Err(TranspileError::config(format!("codegen.types: '{from}' maps to an empty type"), path));
            }
        }
        Ok(())
    }
}

fn find_config_walk(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        // .git may be a file for worktrees and submodules
        if dir.join(".git").exists() {
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}
