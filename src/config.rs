//! Runtime configuration and logger setup.

use std::{
    env,
    path::PathBuf,
    str::FromStr
};
use log::{
    LevelFilter,
    SetLoggerError
};

/// Where the record file lives, unless overridden.
pub const DEFAULT_STORE: &str = "werewolf.json";

/// Environment variable overriding the record file location.
pub const STORE_VAR: &str = "WEREWOLF_STORE";

/// Environment variable overriding the log level, e.g. `debug`.
pub const LOG_VAR: &str = "WEREWOLF_LOG";

/// Settings for the command-line front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the JSON record file.
    pub store: PathBuf,
    /// Maximum level of log messages to print.
    pub log_level: LevelFilter
}

impl Default for Config {
    fn default() -> Config {
        Config {
            store: PathBuf::from(DEFAULT_STORE),
            log_level: LevelFilter::Warn
        }
    }
}

impl Config {
    /// Reads `WEREWOLF_STORE` and `WEREWOLF_LOG`, falling back to the defaults. An unparseable log level is ignored.
    pub fn from_env() -> Config {
        let mut config = Config::default();
        if let Some(store) = env::var_os(STORE_VAR) {
            config.store = PathBuf::from(store);
        }
        if let Some(level) = env::var(LOG_VAR).ok().and_then(|level| LevelFilter::from_str(&level).ok()) {
            config.log_level = level;
        }
        config
    }

    /// Raises the log level by one step per `-v`.
    pub fn with_verbosity(mut self, verbosity: u8) -> Config {
        let levels = LevelFilter::iter().collect::<Vec<_>>();
        let current = levels.iter().position(|&level| level == self.log_level).unwrap_or(0);
        self.log_level = levels[(current + usize::from(verbosity)).min(levels.len() - 1)];
        self
    }

    /// Installs `env_logger` as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if a global logger is already installed. The existing logger stays in place.
    pub fn init_logger(&self) -> Result<(), SetLoggerError> {
        env_logger::Builder::new()
            .filter_level(self.log_level)
            .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
            .format_target(true)
            .try_init()
    }
}
