use std::net::SocketAddr;
use std::path::PathBuf;

use radrest::Tables;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// address the HTTP API listens on
    pub listen_addr: SocketAddr,
    /// external base URL clients reach the API through,
    ///  used when rendering Location and Link headers
    pub api_url: Url,
    /// shared secret expected in the X-API-Key header,
    ///  if not set then authentication is disabled
    pub api_key: Option<String>,
    /// maximum number of entries returned by list endpoints
    pub page_size: i64,

    // data store configuration
    /// a sqlite database URL, `sqlite::memory:` keeps
    ///  everything in RAM
    pub database_url: Url,
    /// RADIUS table names, overridable for deployments
    ///  that renamed the standard schema
    pub tables: Tables,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            api_url: Url::parse("http://localhost:8000").expect("static url"),
            api_key: None,
            page_size: radrest::DEFAULT_PAGE_SIZE,
            database_url: Url::parse("sqlite::memory:").expect("static url"),
            tables: Tables::default(),
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_size_comes_from_the_library() {
        assert_eq!(Config::default().page_size, radrest::DEFAULT_PAGE_SIZE);
    }
}
