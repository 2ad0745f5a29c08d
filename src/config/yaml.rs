//! YAML configuration loading and merging

use crate::error::CliError;
use crate::system::System;
use anyhow::{Context as _, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

/// Load and parse one YAML configuration file into a mapping
pub fn load_document(system: &dyn System, path: &Path) -> Result<Mapping> {
    // Check if file exists using System trait
    if !system.exists(path) {
        return Err(CliError::configuration(format!(
            "Configuration file not found: {}",
            path.display()
        ))
        .into());
    }

    let content = system
        .read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    parse_document(&content).with_context(|| {
        return format!(
            "Failed to parse YAML configuration in file: {}\n\
            Please check the syntax and structure of your configuration file",
            path.display()
        );
    })
}

/// Parse YAML text whose top level must be a mapping (or empty)
pub fn parse_document(content: &str) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(content)?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        Value::Bool(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Sequence(_)
        | Value::Tagged(_) => {
            Err(CliError::configuration("Top level of a configuration file must be a mapping").into())
        }
    }
}

/// Merge `overlay` into `base`; nested mappings merge, anything else replaces
pub fn merge_mappings(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        let value = match value {
            Value::Mapping(incoming) => match base.get_mut(&key) {
                Some(&mut Value::Mapping(ref mut existing)) => {
                    merge_mappings(existing, incoming);
                    continue;
                }
                _ => Value::Mapping(incoming),
            },
            other => other,
        };
        debug!("Config key {:?} set by later file", key);
        base.insert(key, value);
    }
}
