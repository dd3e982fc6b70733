// src/shared/config.rs
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Reads a variable that has no sensible default.
pub fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

pub fn string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads and parses a variable, falling back to `default` when unset.
pub fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, env::var(key).ok(), default)
}

pub fn bool_or(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    parse_bool(key, env::var(key).ok(), default)
}

fn parse_value<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_value_uses_default() {
        assert_eq!(parse_value::<u64>("TTL", None, 1800), Ok(1800));
        assert_eq!(parse_value::<u64>("TTL", Some("  ".into()), 1800), Ok(1800));
    }

    #[test]
    fn numeric_value_is_parsed() {
        assert_eq!(parse_value::<u64>("TTL", Some(" 60 ".into()), 1800), Ok(60));
    }

    #[test]
    fn garbage_value_is_reported_with_key() {
        let err = parse_value::<u64>("TTL", Some("soon".into()), 1800).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TTL", .. }));
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert_eq!(parse_bool("FLAG", Some("TRUE".into()), false), Ok(true));
        assert_eq!(parse_bool("FLAG", Some("0".into()), true), Ok(false));
        assert_eq!(parse_bool("FLAG", None, true), Ok(true));
        assert!(parse_bool("FLAG", Some("maybe".into()), true).is_err());
    }
}
