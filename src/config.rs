use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "DALRYEOK_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("dalryeok").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".dalryeok.toml"));
    }

    locations
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_owned(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Events file used when none is given on the command line.
    pub events: Option<PathBuf>,
    /// Default step in days for date listings.
    pub interval: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            events: None,
            interval: 1,
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;

        if config.interval <= 0 {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                &format!("interval must be positive, got {}", config.interval),
            ));
        }

        Ok(config)
    }
}

impl Config {
    pub fn events_path(&self) -> Option<PathBuf> {
        self.events.as_deref().map(expand_home)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|err| {
        Error::from(err).with_msg(&format!("Could not read '{}'", path.display()))
    })?;

    let config = content.parse::<Config>().map_err(|err| {
        let msg = format!(
            "'{}': {}",
            path.display(),
            err.message.as_deref().unwrap_or_default()
        );
        err.with_msg(&msg)
    })?;

    log::debug!("Loaded configuration from '{}'", path.display());

    Ok(config)
}

/// Loads `path` if given, otherwise the first config file found in the
/// default locations. Falls back to defaults if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => load_config(&location),
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!("".parse::<Config>().unwrap(), Config::default());
    }

    #[test]
    fn full_config() {
        let config: Config = "events = \"/tmp/events.toml\"\ninterval = 7\n"
            .parse()
            .unwrap();

        assert_eq!(config.events_path(), Some(PathBuf::from("/tmp/events.toml")));
        assert_eq!(config.interval, 7);
    }

    #[test]
    fn non_positive_interval() {
        let err = "interval = 0".parse::<Config>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn unknown_key() {
        let err = "week_start = \"mon\"".parse::<Config>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn home_is_expanded() {
        let config: Config = "events = \"~/events.toml\"".parse().unwrap();

        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.events_path(), Some(home.join("events.toml")));
        }
    }

    #[test]
    fn explicit_missing_config() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/dalryeok.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }

    #[test]
    fn locations_end_with_home_config() {
        if dirs::home_dir().is_some() {
            let locations = find_configfile_locations();
            assert!(locations
                .last()
                .map_or(false, |p| p.ends_with(".dalryeok.toml")));
        }
    }
}
