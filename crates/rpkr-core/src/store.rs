//! Loading and initialising the `.rpkr.json` project configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rpkr_schema::{CONFIG_FILE, Config, project_name};
use tokio::fs;
use tracing::debug;

use crate::error::ConfigError;
use crate::reporter::Reporter;

/// What [`ConfigStore::init`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// No configuration existed; defaults were written.
    Created,
    /// An existing configuration was replaced with defaults (`force`).
    Overwritten,
    /// A configuration already existed and was left untouched.
    AlreadyInitialised,
}

/// Reads and writes the configuration file of one project root.
pub struct ConfigStore {
    root: PathBuf,
    reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Create a store for the project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            root: root.into(),
            reporter,
        }
    }

    /// The project root this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the configuration file.
    pub fn path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// A fresh default configuration for this project.
    pub fn default_config(&self) -> Config {
        Config::default_for_root(&self.root)
    }

    /// Load the configuration for this run.
    ///
    /// If the file cannot be read (including when it does not exist) the
    /// defaults are written to disk as a one-time bootstrap and the
    /// in-memory defaults are returned; the new file is not re-read. A
    /// failed bootstrap write is reported and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the file was read but is not a
    /// valid configuration.
    pub async fn load(&self) -> Result<Config, ConfigError> {
        let path = self.path();
        match fs::read_to_string(&path).await {
            Ok(content) => {
                let mut config =
                    Config::parse(&content).map_err(|source| ConfigError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                if config.name.is_empty() {
                    config.name = project_name(&self.root);
                }
                debug!(path = %path.display(), name = %config.name, "loaded configuration");
                Ok(config)
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "configuration unreadable, bootstrapping defaults");
                if let Err(e) = self.init(false).await {
                    self.reporter.error(&e.to_string());
                }
                Ok(self.default_config())
            }
        }
    }

    /// Write the default configuration.
    ///
    /// An existing file is only replaced when `force` is set; otherwise a
    /// warning is emitted and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the file cannot be written.
    pub async fn init(&self, force: bool) -> Result<InitOutcome, ConfigError> {
        let path = self.path();
        let exists = fs::try_exists(&path).await.unwrap_or(false);

        if exists && !force {
            self.reporter.warning(&format!(
                "This folder is already initialised with an {CONFIG_FILE} configuration file."
            ));
            self.reporter
                .info("Type `rpkr init --force` to overwrite it with default settings.");
            return Ok(InitOutcome::AlreadyInitialised);
        }

        let content = self.default_config().to_json()?;
        fs::write(&path, content)
            .await
            .map_err(|source| ConfigError::Write {
                path: path.clone(),
                source,
            })?;

        if exists {
            self.reporter.warning(&format!(
                "Overwriting existing {CONFIG_FILE} configuration file."
            ));
        }
        self.reporter.success(&format!(
            "Successfully created {CONFIG_FILE} configuration file with default settings."
        ));

        Ok(if exists {
            InitOutcome::Overwritten
        } else {
            InitOutcome::Created
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use rpkr_schema::DEFAULT_SELECTORS;
    use tempfile::tempdir;

    fn store(root: &Path) -> ConfigStore {
        ConfigStore::new(root, Arc::new(NullReporter))
    }

    #[tokio::test]
    async fn test_load_bootstraps_missing_config() {
        let tmp = tempdir().unwrap();
        let store = store(tmp.path());

        let config = store.load().await.unwrap();

        assert_eq!(config, store.default_config());
        assert!(store.path().exists());
        let written = Config::parse(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(written, config);
    }

    #[tokio::test]
    async fn test_load_reads_existing_config() {
        let tmp = tempdir().unwrap();
        let store = store(tmp.path());
        std::fs::write(store.path(), r#"{ "name": "Mine", "packver": "v9" }"#).unwrap();

        let config = store.load().await.unwrap();

        assert_eq!(config.name, "Mine");
        assert_eq!(config.pack_version, "v9");
        assert!(config.description.is_none());
        assert_eq!(config.selectors().len(), DEFAULT_SELECTORS.len());
    }

    #[tokio::test]
    async fn test_load_names_unnamed_config_after_root() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("Cozy Pack");
        std::fs::create_dir(&root).unwrap();
        let store = store(&root);
        std::fs::write(store.path(), "{}").unwrap();

        assert_eq!(store.load().await.unwrap().name, "Cozy Pack");
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_config() {
        let tmp = tempdir().unwrap();
        let store = store(tmp.path());
        std::fs::write(store.path(), "{ broken").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ broken");
    }

    #[tokio::test]
    async fn test_init_respects_existing_file() {
        let tmp = tempdir().unwrap();
        let store = store(tmp.path());
        std::fs::write(store.path(), r#"{ "name": "Keep" }"#).unwrap();

        let outcome = store.init(false).await.unwrap();

        assert_eq!(outcome, InitOutcome::AlreadyInitialised);
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            r#"{ "name": "Keep" }"#
        );
    }

    #[tokio::test]
    async fn test_init_force_overwrites() {
        let tmp = tempdir().unwrap();
        let store = store(tmp.path());
        std::fs::write(store.path(), r#"{ "name": "Gone" }"#).unwrap();

        let outcome = store.init(true).await.unwrap();

        assert_eq!(outcome, InitOutcome::Overwritten);
        let written = Config::parse(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(written, store.default_config());
    }

    #[tokio::test]
    async fn test_init_write_failure() {
        let tmp = tempdir().unwrap();
        let store = store(&tmp.path().join("missing-dir"));

        let err = store.init(false).await.unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
    }
}
