//! Classification of single argument tokens

use crate::cli::option::{OptionRegistry, OptionSpec};

/// Whether the dispatcher should treat the token as an option
#[must_use]
#[inline]
pub fn is_option_like(token: &str) -> bool {
    token.starts_with('-')
}

/// Everything after the first `=`, if the token has one
#[must_use]
#[inline]
pub fn embedded_value(token: &str) -> Option<&str> {
    token.split_once('=').map(|(_, value)| value)
}

/// Find the option a token refers to
///
/// `--name[=value]` is looked up by name and `-alias[=value]` by alias.
/// Positional tokens, and option tokens with an empty name such as `--` or
/// `-=x`, resolve to nothing.
#[must_use]
#[inline]
pub fn resolve_option<'reg>(token: &str, registry: &'reg OptionRegistry) -> Option<&'reg OptionSpec> {
    if let Some(rest) = token.strip_prefix("--") {
        let name = candidate(rest)?;
        return registry.get(name);
    }
    if let Some(rest) = token.strip_prefix('-') {
        let alias = candidate(rest)?;
        return registry.find_by_alias(alias);
    }
    None
}

fn candidate(rest: &str) -> Option<&str> {
    let key = rest.split_once('=').map_or(rest, |(key, _)| key);
    (!key.is_empty()).then_some(key)
}
