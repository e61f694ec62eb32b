//! Grammar configuration loading.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use oxide_surql_core::GrammarConfig;

/// Loads the grammar configuration.
///
/// The JSON file at `path` is read first, if given; `table_prefix` then
/// overrides the file's prefix.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a valid configuration.
pub fn load(path: Option<&Path>, table_prefix: Option<String>) -> anyhow::Result<GrammarConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            parse(&text).with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => GrammarConfig::default(),
    };

    if let Some(prefix) = table_prefix {
        config.table_prefix = prefix;
    }
    debug!(table_prefix = %config.table_prefix, "Loaded grammar config");
    Ok(config)
}

fn parse(text: &str) -> serde_json::Result<GrammarConfig> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        assert_eq!(load(None, None).unwrap(), GrammarConfig::default());
    }

    #[test]
    fn test_prefix_override() {
        let config = load(None, Some(String::from("app_"))).unwrap();
        assert_eq!(config.table_prefix, "app_");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse(r#"{"table_prefix": "t_"}"#).unwrap().table_prefix, "t_");
        assert!(parse("{").is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        let err = load(Some(Path::new("/nonexistent/surql.json")), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
