use std::path::PathBuf;
use std::time::Duration;

use hummingbird::{Credentials, Rules};
use log::info;

use crate::{Error, Result};

const DEFAULT_URL: &str = "http://api.jingneng.site:81";
const DEFAULT_DEVICE_ID: &str = "74835337";
const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub credentials: Credentials,
    pub device_id: String,
    /// Zero disables polling, the device is read once.
    pub poll_interval: Duration,
    pub rules_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Result<Config>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| var(name).ok_or(Error::MissingEnv(name));

        let poll_interval = match var("ELSBETH_POLL_INTERVAL_MS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| Error::InvalidEnv("ELSBETH_POLL_INTERVAL_MS", value))?,
            None => DEFAULT_POLL_INTERVAL_MS,
        };

        Ok(Config {
            base_url: var("HUMMINGBIRD_URL").unwrap_or_else(|| DEFAULT_URL.to_owned()),
            credentials: Credentials {
                username: required("HUMMINGBIRD_USER")?,
                password: required("HUMMINGBIRD_PASS")?,
            },
            device_id: var("HUMMINGBIRD_DEVICE_ID")
                .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_owned()),
            poll_interval: Duration::from_millis(poll_interval),
            rules_path: var("ELSBETH_RULES").map(PathBuf::from),
        })
    }

    pub fn load_rules(&self) -> Result<Rules> {
        match &self.rules_path {
            Some(path) => {
                info!("loading rules from {}", path.display());
                let json = std::fs::read_to_string(path)?;
                Ok(Rules::from_json(&json)?)
            }
            None => Ok(Rules::default()),
        }
    }
}
