//! Configuration management module
//!
//! Loads one or more YAML files, merges them with later-file-wins precedence
//! and exposes typed lookups by dotted path (`server.port`, `hosts.0`).

pub mod yaml;

use crate::cli::ParsedOptions;
use crate::cli::runner::OPT_CONFIG_NAME;
use crate::system::System;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::info;

/// Merged configuration tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    root: Mapping,
}

impl Config {
    /// Load and merge configuration files; later files win
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A file does not exist or cannot be read
    /// - A file is not valid YAML or its top level is not a mapping
    #[inline]
    pub fn load_from_files<P: AsRef<Path>>(system: &dyn System, paths: &[P]) -> anyhow::Result<Self> {
        let mut root = Mapping::new();
        for path in paths {
            let document = yaml::load_document(system, path.as_ref())?;
            info!("Loaded configuration from {}", path.as_ref().display());
            yaml::merge_mappings(&mut root, document);
        }
        Ok(Self { root })
    }

    /// Load configuration from a single file
    ///
    /// # Errors
    ///
    /// See [`Config::load_from_files`].
    #[inline]
    pub fn load_from_file<P: AsRef<Path>>(system: &dyn System, path: P) -> anyhow::Result<Self> {
        Self::load_from_files(system, &[path])
    }

    /// Load the file named by the reserved `config` option, if it was given
    ///
    /// # Errors
    ///
    /// See [`Config::load_from_files`].
    #[inline]
    pub fn from_options(system: &dyn System, options: &ParsedOptions) -> anyhow::Result<Option<Self>> {
        options
            .value(OPT_CONFIG_NAME)
            .map(|path| Self::load_from_file(system, path))
            .transpose()
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not valid YAML or its top level is not a mapping
    #[inline]
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(Self {
            root: yaml::parse_document(content)?,
        })
    }

    /// Raw value at a dotted path
    #[must_use]
    #[inline]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = match *current {
                Value::Mapping(ref mapping) => mapping.get(segment)?,
                Value::Sequence(ref items) => items.get(segment.parse::<usize>().ok()?)?,
                Value::Tagged(ref tagged) => tagged.value.get(segment)?,
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => return None,
            };
        }
        Some(current)
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Top-level keys in file order
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().filter_map(Value::as_str)
    }

    /// String at a path; numbers and booleans are rendered as text
    #[must_use]
    #[inline]
    pub fn get_string(&self, path: &str) -> Option<String> {
        match *self.get(path)? {
            Value::String(ref s) => Some(s.clone()),
            Value::Number(ref n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
        }
    }

    /// Boolean at a path; `"true"`/`"false"` strings are accepted
    #[must_use]
    #[inline]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        match *self.get(path)? {
            Value::Bool(b) => Some(b),
            Value::String(ref s) => s.parse().ok(),
            Value::Null
            | Value::Number(_)
            | Value::Sequence(_)
            | Value::Mapping(_)
            | Value::Tagged(_) => None,
        }
    }

    /// Integer at a path; numeric strings are accepted
    #[must_use]
    #[inline]
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        value_as_i64(self.get(path)?)
    }

    /// Float at a path; integers and numeric strings are accepted
    #[must_use]
    #[inline]
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        match *self.get(path)? {
            Value::Number(ref n) => n.as_f64(),
            Value::String(ref s) => s.parse().ok(),
            Value::Null
            | Value::Bool(_)
            | Value::Sequence(_)
            | Value::Mapping(_)
            | Value::Tagged(_) => None,
        }
    }

    /// Sequence at a path
    #[must_use]
    #[inline]
    pub fn get_array(&self, path: &str) -> Option<&[Value]> {
        self.get(path)?.as_sequence().map(Vec::as_slice)
    }

    /// Sequence of integers at a path; `None` if any item is not an integer
    #[must_use]
    #[inline]
    pub fn get_array_i64(&self, path: &str) -> Option<Vec<i64>> {
        self.get_array(path)?.iter().map(value_as_i64).collect()
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match *value {
        Value::Number(ref n) => n.as_i64(),
        Value::String(ref s) => s.parse().ok(),
        Value::Null | Value::Bool(_) | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
            None
        }
    }
}
