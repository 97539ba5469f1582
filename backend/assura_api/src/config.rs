//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use assura_sim::chat::ChatConfig;

use crate::errors::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the REST API server
    pub api_port: u16,
    /// Optional seed making every slice's random stream reproducible
    pub sim_seed: Option<u64>,
    /// Display name used for canned chat replies
    pub chat_persona: String,
    /// Lower bound of the simulated reply latency
    pub chat_reply_min_ms: u64,
    /// Upper bound of the simulated reply latency
    pub chat_reply_max_ms: u64,
    /// Seed transactions, projects, proposals and suggestions on start-up
    pub seed_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_port: 3001,
            sim_seed: None,
            chat_persona: "Alex".to_string(),
            chat_reply_min_ms: 1_000,
            chat_reply_max_ms: 2_500,
            seed_on_start: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let config = Config {
            api_port: parse_or(&lookup, "API_PORT", defaults.api_port)?,
            sim_seed: match lookup("SIM_SEED") {
                Some(raw) => Some(parse_value("SIM_SEED", &raw)?),
                None => None,
            },
            chat_persona: lookup("CHAT_PERSONA").unwrap_or(defaults.chat_persona),
            chat_reply_min_ms: parse_or(&lookup, "CHAT_REPLY_MIN_MS", defaults.chat_reply_min_ms)?,
            chat_reply_max_ms: parse_or(&lookup, "CHAT_REPLY_MAX_MS", defaults.chat_reply_max_ms)?,
            seed_on_start: parse_or(&lookup, "SEED_ON_START", defaults.seed_on_start)?,
        };
        // Surface an inverted delay window at start-up rather than on first chat.
        config.chat_config()?;
        Ok(config)
    }

    pub fn chat_config(&self) -> Result<ChatConfig> {
        ChatConfig::new(
            self.chat_persona.clone(),
            Duration::from_millis(self.chat_reply_min_ms),
            Duration::from_millis(self.chat_reply_max_ms),
        )
        .map_err(|e| ApiError::Config(e.to_string()))
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Config(format!("Invalid {key}: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_port, 3001);
        assert_eq!(config.sim_seed, None);
        assert_eq!(config.chat_persona, "Alex");
        assert!(config.seed_on_start);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("API_PORT", "8080"),
            ("SIM_SEED", "42"),
            ("CHAT_PERSONA", "Rowan"),
            ("SEED_ON_START", "false"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.sim_seed, Some(42));
        assert_eq!(config.chat_persona, "Rowan");
        assert!(!config.seed_on_start);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("API_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains("API_PORT")));

        let err = Config::from_lookup(lookup(&[
            ("CHAT_REPLY_MIN_MS", "3000"),
            ("CHAT_REPLY_MAX_MS", "1000"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
