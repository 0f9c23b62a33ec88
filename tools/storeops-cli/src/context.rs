//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use storeops_data::{DataStore, Dataset};

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Dataset directory, after flag/config resolution.
    pub data_dir: PathBuf,
}

impl Context {
    /// Load context from config file and flags.
    ///
    /// The data directory resolves in order: `--data-dir`, the config
    /// file's `data.dir`, then `./data`.
    pub fn load(
        config_path: Option<&str>,
        data_dir: Option<&str>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        let data_dir = match data_dir {
            Some(dir) => Self::resolve(&cwd, dir),
            None => Self::resolve(&cwd, &config.data.dir),
        };

        Ok(Self {
            config,
            output,
            cwd,
            data_dir,
        })
    }

    /// Find `storeops.toml` in the directory tree, walking upward.
    fn find_config(start: &PathBuf) -> Option<CliConfig> {
        let config_names = ["storeops.toml", ".storeops.toml"];

        let mut current = start.clone();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the dataset store at the resolved directory.
    pub fn store(&self) -> DataStore {
        DataStore::new(&self.data_dir)
    }

    /// Load the full dataset.
    pub fn load_dataset(&self) -> Result<Dataset> {
        self.output
            .debug(&format!("loading dataset from {}", self.data_dir.display()));
        self.store()
            .load()
            .with_context(|| format!("Failed to load dataset from {}", self.data_dir.display()))
    }

    /// Save the full dataset back.
    pub fn save_dataset(&self, dataset: &Dataset) -> Result<()> {
        self.store()
            .save(dataset)
            .with_context(|| format!("Failed to save dataset to {}", self.data_dir.display()))
    }

    fn resolve(cwd: &PathBuf, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            cwd.join(path)
        }
    }
}
