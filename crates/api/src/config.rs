//! Server configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `REDIS_ADDR` — Redis `host:port` (default: `"localhost:6379"`)
/// - `KAFKA_BROKERS` — Kafka bootstrap servers (default: `"localhost:9092"`)
/// - `HTTP_ADDR` — listen address (default: `":8081"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_addr: String,
    pub kafka_brokers: String,
    pub http_addr: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            redis_addr: env_or("REDIS_ADDR", "localhost:6379"),
            kafka_brokers: env_or("KAFKA_BROKERS", "localhost:9092"),
            http_addr: env_or("HTTP_ADDR", ":8081"),
        }
    }

    /// Returns the bind address; a bare `":port"` binds all interfaces.
    pub fn bind_addr(&self) -> String {
        if self.http_addr.starts_with(':') {
            format!("0.0.0.0{}", self.http_addr)
        } else {
            self.http_addr.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_addr: "localhost:6379".to_string(),
            kafka_brokers: "localhost:9092".to_string(),
            http_addr: ":8081".to_string(),
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = Config::default();
        assert_eq!(config.redis_addr, "localhost:6379");
        assert_eq!(config.kafka_brokers, "localhost:9092");
        assert_eq!(config.http_addr, ":8081");
    }

    #[test]
    fn bind_addr_expands_bare_port() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn bind_addr_passes_through_full_address() {
        let config = Config {
            http_addr: "127.0.0.1:9000".to_string(),
            ..Config::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
