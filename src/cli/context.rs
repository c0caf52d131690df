use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{AppPaths, Config};
use crate::error::PicResult;

/// Everything a run needs that would otherwise be global: the loaded config
/// and the directories it reads and writes.
pub struct RunContext {
    pub config: Config,
    pub paths: AppPaths,
}

impl RunContext {
    pub fn new(config: Config, paths: AppPaths) -> Self {
        Self { config, paths }
    }

    /// Load config from `config_path` (or the platform default) and apply a
    /// database path given on the command line.
    pub fn load(config_path: Option<&Path>, database: Option<PathBuf>) -> PicResult<Self> {
        let paths = AppPaths::from_platform()?;
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| paths.config_file());
        debug!("Reading config from {}", config_path.display());

        let mut config = Config::load(&config_path)?;
        if database.is_some() {
            config.database = database;
        }
        Ok(Self::new(config, paths))
    }

    pub fn database_path(&self) -> PathBuf {
        self.config
            .database
            .clone()
            .unwrap_or_else(|| self.paths.default_database())
    }
}
