use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in the
/// file override whatever the environment provided.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 4000
///
/// providers:
///   deepgram_api_key: "your-deepgram-key"
///   groq_api_key: "your-groq-key"
///   deepgram_stt_url: "wss://api.deepgram.com/v1/listen"
///   deepgram_tts_url: "https://api.deepgram.com/v1/speak"
///   groq_api_url: "https://api.groq.com/openai/v1/chat/completions"
///
/// security:
///   cors_allowed_origins: "https://app.example.com"
///
/// relay:
///   close_client_on_upstream_error: false
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub providers: Option<ProvidersYaml>,
    pub security: Option<SecurityYaml>,
    pub relay: Option<RelayYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Provider credentials and endpoints from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    /// Deepgram key, used for both live transcription and speech synthesis
    pub deepgram_api_key: Option<String>,
    /// Groq key for chat completions
    pub groq_api_key: Option<String>,
    pub deepgram_stt_url: Option<String>,
    pub deepgram_tts_url: Option<String>,
    pub groq_api_url: Option<String>,
}

/// Security settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    pub cors_allowed_origins: Option<String>,
}

/// Relay session behavior from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RelayYaml {
    pub close_client_on_upstream_error: Option<bool>,
}

impl YamlConfig {
    /// Load a YAML configuration file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080

providers:
  deepgram_api_key: "dg-key"
  groq_api_key: "groq-key"
  deepgram_stt_url: "ws://localhost:9000/v1/listen"

security:
  cors_allowed_origins: "https://app.example.com"

relay:
  close_client_on_upstream_error: true
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(8080));

        let providers = config.providers.as_ref().unwrap();
        assert_eq!(providers.deepgram_api_key.as_deref(), Some("dg-key"));
        assert_eq!(providers.groq_api_key.as_deref(), Some("groq-key"));
        assert_eq!(
            providers.deepgram_stt_url.as_deref(),
            Some("ws://localhost:9000/v1/listen")
        );
        assert!(providers.deepgram_tts_url.is_none());

        assert_eq!(
            config.security.unwrap().cors_allowed_origins.as_deref(),
            Some("https://app.example.com")
        );
        assert_eq!(
            config.relay.unwrap().close_client_on_upstream_error,
            Some(true)
        );
    }

    #[test]
    fn test_yaml_config_partial() {
        let yaml = r#"
server:
  port: 5000
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.unwrap().port, Some(5000));
        assert!(config.providers.is_none());
        assert!(config.relay.is_none());
    }

    #[test]
    fn test_yaml_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "providers:\n  groq_api_key: \"from-file\"\n").unwrap();

        let config = YamlConfig::from_file(&path).unwrap();
        assert_eq!(
            config.providers.unwrap().groq_api_key.as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn test_yaml_from_missing_file() {
        let path = PathBuf::from("/nonexistent/waav-relay/config.yaml");
        let result = YamlConfig::from_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn test_yaml_invalid_syntax() {
        let yaml = "server: [unclosed";
        let result: Result<YamlConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
