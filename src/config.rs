use crate::alerts::DEFAULT_ALERT_TTL;
use std::{
    env,
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    time::Duration,
};

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address; loopback unless `HOST` says otherwise.
    pub host: IpAddr,
    pub port: u16,
    pub backend_url: String,
    pub prefs_path: PathBuf,
    pub alert_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            backend_url: "http://127.0.0.1:5000".to_string(),
            prefs_path: PathBuf::from("data/prefs.json"),
            alert_ttl: DEFAULT_ALERT_TTL,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST")
                .and_then(|value| value.trim().parse::<IpAddr>().ok())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            backend_url: lookup("BACKEND_URL")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.backend_url),
            prefs_path: lookup("APP_PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.prefs_path),
            alert_ttl: lookup("ALERT_TTL_MS")
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.alert_ttl),
        }
    }
}
