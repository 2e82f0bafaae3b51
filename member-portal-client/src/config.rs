use std::str::FromStr;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_LEVEL: log::Level = log::Level::Debug;

/// Settings fixed when the bundle is built. Constructed once by the entry point and handed to
/// [App][crate::App].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: &'static str,
    pub log_level: log::Level,
}

impl AppConfig {
    /// Build the config from the `MEMBER_PORTAL_BACKEND_URL` and `MEMBER_PORTAL_LOG_LEVEL`
    /// variables captured at compile time
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("MEMBER_PORTAL_BACKEND_URL"),
            option_env!("MEMBER_PORTAL_LOG_LEVEL"),
        )
    }

    fn from_values(backend_url: Option<&'static str>, log_level: Option<&str>) -> Self {
        let backend_url = backend_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/');
        let log_level = log_level
            .and_then(|level| log::Level::from_str(level.trim()).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);
        Self {
            backend_url,
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
