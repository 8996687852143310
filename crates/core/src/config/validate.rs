use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - TMDB section exists (enforced by serde) and carries a token
/// - Server port is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Provider validation
    if config.tmdb.bearer_token.is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.bearer_token cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_validate_valid_config() {
        let config = load_config_from_str(
            r#"
[tmdb]
bearer_token = "test-token"
"#,
        )
        .unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = load_config_from_str(
            r#"
[tmdb]
bearer_token = "test-token"

[server]
port = 0
"#,
        )
        .unwrap();
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_token_fails() {
        let config = load_config_from_str(
            r#"
[tmdb]
bearer_token = ""
"#,
        )
        .unwrap();
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }
}
