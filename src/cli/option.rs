//! Option definitions, per-command registries and the merged option set

use crate::error::CliError;
use serde::Serialize;

/// Static definition of one option, as registered on a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    name: String,
    alias: Option<String>,
    description: String,
    expects_value: bool,
    default_value: Option<String>,
}

impl OptionSpec {
    /// A switch that is either present or absent
    #[must_use]
    #[inline]
    pub fn flag<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            alias: None,
            description: String::new(),
            expects_value: false,
            default_value: None,
        }
    }

    /// An option that carries a value (`--name=value` or `--name value`)
    #[must_use]
    #[inline]
    pub fn value<S: Into<String>>(name: S) -> Self {
        Self {
            expects_value: true,
            ..Self::flag(name)
        }
    }

    /// Set the short alias (`-a`)
    #[must_use]
    #[inline]
    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        let alias = alias.into();
        self.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    /// Set the display description
    #[must_use]
    #[inline]
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Pre-seed the value reported when the option is not given
    #[must_use]
    #[inline]
    pub fn default_value<S: Into<String>>(mut self, value: S) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[must_use]
    #[inline]
    pub fn description_text(&self) -> &str {
        &self.description
    }

    #[must_use]
    #[inline]
    pub const fn expects_value(&self) -> bool {
        self.expects_value
    }

    #[must_use]
    #[inline]
    pub fn initial_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

/// Registration-ordered set of options owned by one command
///
/// Names are unique, and non-empty aliases are unique. Both are checked on
/// [`OptionRegistry::register`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionRegistry {
    entries: Vec<OptionSpec>,
}

impl OptionRegistry {
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry of options whose names and aliases are known to be distinct
    pub(crate) fn reserved<I: IntoIterator<Item = OptionSpec>>(specs: I) -> Self {
        let entries: Vec<OptionSpec> = specs.into_iter().collect();
        debug_assert!(
            entries.iter().enumerate().all(|(i, spec)| {
                entries[..i].iter().all(|other| {
                    other.name != spec.name
                        && (spec.alias.is_none() || other.alias != spec.alias)
                })
            }),
            "reserved options must not conflict"
        );
        Self { entries }
    }

    /// Add an option to the registry
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another option already uses the same name
    /// - Another option already uses the same alias
    #[inline]
    pub fn register(&mut self, owner: &str, spec: OptionSpec) -> Result<(), CliError> {
        if self.get(spec.name()).is_some() {
            return Err(CliError::DuplicateOption {
                command: owner.to_owned(),
                name: spec.name().to_owned(),
            });
        }
        if let Some(alias) = spec.alias_name()
            && self.find_by_alias(alias).is_some()
        {
            return Err(CliError::DuplicateAlias {
                command: owner.to_owned(),
                alias: alias.to_owned(),
            });
        }
        self.entries.push(spec);
        Ok(())
    }

    /// Look up an option by exact name
    #[must_use]
    #[inline]
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.entries.iter().find(|spec| spec.name == name)
    }

    /// Look up an option by exact alias
    #[must_use]
    #[inline]
    pub fn find_by_alias(&self, alias: &str) -> Option<&OptionSpec> {
        self.entries
            .iter()
            .find(|spec| spec.alias_name() == Some(alias))
    }

    /// Iterate in registration order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.entries.iter()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State of one option after a parse pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub expects_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub is_set: bool,
}

impl From<&OptionSpec> for ParsedOption {
    #[inline]
    fn from(spec: &OptionSpec) -> Self {
        Self {
            name: spec.name.clone(),
            alias: spec.alias.clone(),
            description: spec.description.clone(),
            expects_value: spec.expects_value,
            value: spec.default_value.clone(),
            is_set: false,
        }
    }
}

/// The merged option set handed to a command action
///
/// Built fresh for every dispatch from the static registries along the
/// matched command path, so nothing carries over between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedOptions {
    entries: Vec<ParsedOption>,
}

impl ParsedOptions {
    /// Defaults of a single registry
    #[must_use]
    #[inline]
    pub fn from_registry(registry: &OptionRegistry) -> Self {
        Self {
            entries: registry.iter().map(ParsedOption::from).collect(),
        }
    }

    /// Union a descendant's registry into this set
    ///
    /// Same-named entries are replaced in place by the descendant's defaults;
    /// new names are appended. Everything else keeps its resolved state.
    #[inline]
    pub fn merge(&mut self, registry: &OptionRegistry) {
        for spec in registry.iter() {
            let fresh = ParsedOption::from(spec);
            match self.position(spec.name()) {
                Some(index) => self.entries[index] = fresh,
                None => self.entries.push(fresh),
            }
        }
    }

    /// Record a value for a value option
    #[inline]
    pub(crate) fn set_value(&mut self, spec: &OptionSpec, value: &str) {
        self.entry_mut(spec).value = Some(value.to_owned());
    }

    /// Record that a flag was observed
    #[inline]
    pub(crate) fn mark_set(&mut self, spec: &OptionSpec) {
        self.entry_mut(spec).is_set = true;
    }

    fn entry_mut(&mut self, spec: &OptionSpec) -> &mut ParsedOption {
        let index = match self.position(spec.name()) {
            Some(index) => index,
            None => {
                self.entries.push(ParsedOption::from(spec));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    #[must_use]
    #[inline]
    pub fn get(&self, name: &str) -> Option<&ParsedOption> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Resolved value of an option, or its default
    #[must_use]
    #[inline]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|entry| entry.value.as_deref())
    }

    /// Whether a flag was given on the command line
    #[must_use]
    #[inline]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|entry| entry.is_set)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ParsedOption> {
        self.entries.iter()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'opts> IntoIterator for &'opts ParsedOptions {
    type Item = &'opts ParsedOption;
    type IntoIter = core::slice::Iter<'opts, ParsedOption>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(specs: Vec<OptionSpec>) -> OptionRegistry {
        let mut registry = OptionRegistry::new();
        for spec in specs {
            registry.register("test", spec).unwrap();
        }
        registry
    }

    #[test]
    fn test_entry_mut_appends_unknown_spec() {
        let mut options = ParsedOptions::default();
        options.mark_set(&OptionSpec::flag("force"));
        assert!(options.is_set("force"));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_merge_replaces_in_place() {
        let parent = registry(vec![
            OptionSpec::value("url").default_value("parent"),
            OptionSpec::flag("quiet"),
        ]);
        let child = registry(vec![
            OptionSpec::flag("local"),
            OptionSpec::value("url").default_value("child"),
        ]);

        let mut options = ParsedOptions::from_registry(&parent);
        options.mark_set(parent.get("quiet").unwrap());
        options.merge(&child);

        let names: Vec<&str> = options.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["url", "quiet", "local"]);
        assert_eq!(options.value("url"), Some("child"));
        assert!(options.is_set("quiet"));
    }
}
