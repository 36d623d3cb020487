use std::env;
use std::str::FromStr;

use super::{
    DEFAULT_DEEPGRAM_STT_URL, DEFAULT_DEEPGRAM_TTS_URL, DEFAULT_GROQ_API_URL, DEFAULT_HOST,
    DEFAULT_PORT, ServerConfig,
};

/// Read an environment variable, treating empty values as unset
pub(super) fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse an environment variable
pub(super) fn env_parse<T>(name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {name} ('{raw}'): {e}")),
        None => Ok(None),
    }
}

/// Parse a boolean flag such as `true`, `1`, `yes`, `false`, `0`, `no`
pub(super) fn parse_bool(name: &str, raw: &str) -> Result<bool, String> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("Invalid boolean for {name}: '{other}'")),
    }
}

/// Build a [`ServerConfig`] from environment variables and defaults
///
/// API keys are read but never required here; a missing key surfaces when the
/// corresponding upstream call is attempted.
pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let close_client_on_upstream_error = match env_string("CLOSE_CLIENT_ON_UPSTREAM_ERROR") {
        Some(raw) => parse_bool("CLOSE_CLIENT_ON_UPSTREAM_ERROR", &raw)?,
        None => false,
    };

    Ok(ServerConfig {
        host: env_string("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: env_parse::<u16>("PORT")?.unwrap_or(DEFAULT_PORT),
        deepgram_api_key: env_string("DEEPGRAM_API_KEY"),
        groq_api_key: env_string("GROQ_API_KEY"),
        deepgram_stt_url: env_string("DEEPGRAM_STT_URL")
            .unwrap_or_else(|| DEFAULT_DEEPGRAM_STT_URL.to_string()),
        deepgram_tts_url: env_string("DEEPGRAM_TTS_URL")
            .unwrap_or_else(|| DEFAULT_DEEPGRAM_TTS_URL.to_string()),
        groq_api_url: env_string("GROQ_API_URL")
            .unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string()),
        cors_allowed_origins: Some(
            env_string("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),
        ),
        close_client_on_upstream_error,
    })
}
