//! Runtime configuration for a table session.

use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "db.dat";

#[derive(Debug, Clone)]
pub struct Config {
    /// Backing file for the table. Created if missing.
    pub db_path: PathBuf,

    /// Write the touched page after every successful insert instead of only
    /// on close.
    pub flush_every_insert: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            flush_every_insert: false,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    pub fn flush_every_insert(mut self, enabled: bool) -> Self {
        self.config.flush_every_insert = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
