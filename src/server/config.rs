use super::RequestsLoggingLevel;

/// Runtime settings the handlers need.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub collection: String,
    pub requests_logging_level: RequestsLoggingLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            collection: "results".to_string(),
            requests_logging_level: RequestsLoggingLevel::default(),
        }
    }
}
