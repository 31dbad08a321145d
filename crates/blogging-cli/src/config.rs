//! Layered configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `BLOGGING_*` environment variables (a `.env` file is loaded into the
//! environment first), then command-line flags.

use std::path::{Path, PathBuf};

use blogging_core::errors::{ExError, ExErrorKind};
use blogging_core::logging_facility::Profile;
use blogging_core::DeletePolicy;
use blogging_store::ConnectionOptions;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "blogging.toml";

const DEFAULT_DB_PATH: &str = ".blogging/blog.db";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BloggingConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Policy used by `blog delete` when `--policy` is not given
    pub delete_policy: DeletePolicy,

    /// How long a writer waits on a locked database
    pub busy_timeout_ms: u64,

    /// `development` or `production`
    pub log_profile: String,
}

impl BloggingConfig {
    /// Load configuration from every source
    ///
    /// A missing config file is not an error; a malformed one is.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if a source cannot be read or a value
    /// has the wrong type.
    pub fn load(config_file: &Path, db_override: Option<&Path>) -> Result<Self, ExError> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .set_default("db_path", DEFAULT_DB_PATH)
            .and_then(|b| b.set_default("delete_policy", "cascade"))
            .and_then(|b| b.set_default("busy_timeout_ms", 5000_i64))
            .and_then(|b| b.set_default("log_profile", "development"))
            .map_err(config_error)?
            .add_source(
                File::from(config_file)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("BLOGGING").try_parsing(true));

        if let Some(db_path) = db_override {
            let db_path = db_path.to_str().ok_or_else(|| {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("load_config")
                    .with_message("--db path is not valid UTF-8")
            })?;
            builder = builder
                .set_override("db_path", db_path)
                .map_err(config_error)?;
        }

        builder
            .build()
            .and_then(|settings| settings.try_deserialize::<BloggingConfig>())
            .map_err(config_error)
    }

    /// Logging profile named by `log_profile`
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error for an unknown profile name.
    pub fn profile(&self) -> Result<Profile, ExError> {
        self.log_profile.parse::<Profile>().map_err(|reason| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message(reason)
        })
    }

    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions::with_busy_timeout_ms(self.busy_timeout_ms)
    }
}

fn config_error(err: config::ConfigError) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_config")
        .with_message(err.to_string())
}
