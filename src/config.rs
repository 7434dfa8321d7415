use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid number, got '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Broker-side settings for the order topic.
#[derive(Debug, Clone)]
pub struct KafkaSettings {
    pub brokers: String,
    pub topic: String,
    pub partition: i32,
    pub group_id: String,
    /// How long startup waits for the broker to answer a metadata request.
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cache_capacity: usize,
    pub kafka: KafkaSettings,
}

impl KafkaSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Ok(Self {
            brokers: get(vars, "KAFKA_BROKERS", "localhost:9092"),
            topic: get(vars, "KAFKA_TOPIC", "orders"),
            partition: parse("KAFKA_PARTITION", get(vars, "KAFKA_PARTITION", "0"))?,
            group_id: get(vars, "KAFKA_GROUP_ID", "order-cache-service"),
            connect_timeout: Duration::from_secs(parse(
                "KAFKA_CONNECT_TIMEOUT_SECS",
                get(vars, "KAFKA_CONNECT_TIMEOUT_SECS", "10"),
            )?),
        })
    }
}

impl Config {
    /// Read configuration from the process environment (after `.env`, if any,
    /// has been loaded by the caller).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .cloned()
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            host: get(&vars, "HOST", "0.0.0.0"),
            port: parse("PORT", get(&vars, "PORT", "8080"))?,
            cache_capacity: parse("CACHE_CAPACITY", get(&vars, "CACHE_CAPACITY", "100"))?,
            kafka: KafkaSettings::from_vars(&vars)?,
        })
    }
}

fn get(vars: &HashMap<String, String>, name: &str, default: &str) -> String {
    vars.get(name)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let cfg = Config::from_vars(vars(&[("DATABASE_URL", "postgres://x")])).expect("valid");

        assert_eq!(cfg.database_url, "postgres://x");
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.cache_capacity, 100);
        assert_eq!(cfg.kafka.brokers, "localhost:9092");
        assert_eq!(cfg.kafka.topic, "orders");
        assert_eq!(cfg.kafka.partition, 0);
        assert_eq!(cfg.kafka.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_read() {
        let cfg = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://x"),
            ("PORT", "9000"),
            ("KAFKA_TOPIC", "wb-orders"),
            ("KAFKA_PARTITION", "2"),
        ]))
        .expect("valid");

        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.kafka.topic, "wb-orders");
        assert_eq!(cfg.kafka.partition, 2);
    }

    #[test]
    fn kafka_settings_do_not_need_a_database() {
        let kafka = KafkaSettings::from_vars(&vars(&[("KAFKA_BROKERS", "kafka:29092")]))
            .expect("valid");
        assert_eq!(kafka.brokers, "kafka:29092");
        assert_eq!(kafka.group_id, "order-cache-service");
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Config::from_vars(HashMap::new()).expect_err("must fail");
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = Config::from_vars(vars(&[("DATABASE_URL", "postgres://x"), ("PORT", "http")]))
            .expect_err("must fail");
        assert_eq!(err.to_string(), "PORT must be a valid number, got 'http'");
    }
}
