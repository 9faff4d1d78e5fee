use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub output: OutputConfig,
}

/// Input bounds applied before any template matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Longest chunk sequence considered, outer or embedded
    pub max_chunks: usize,
    /// Largest script (bytes) that will be tokenized, whether the caller's
    /// input or the redeem script embedded in a P2SH spending script
    pub max_script_size: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_chunks: 201,
            max_script_size: 10_000,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunks < crate::parser::factory::MIN_CHUNKS {
            return Err(ConfigError::Message(format!(
                "classifier.max_chunks must be at least {}, got {}",
                crate::parser::factory::MIN_CHUNKS,
                self.max_chunks
            )));
        }
        if self.max_script_size == 0 {
            return Err(ConfigError::Message(
                "classifier.max_script_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration from defaults, a config file and environment variables
    ///
    /// Reads `path` when given, otherwise ./config.toml if present.
    /// Environment variables take precedence over file configuration.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = ClassifierConfig::default();
        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        let config = Config::builder()
            .set_default("classifier.max_chunks", defaults.max_chunks as i64)?
            .set_default("classifier.max_script_size", defaults.max_script_size as i64)?
            .set_default("output.format", "text")?
            .add_source(file_source)
            // REDEEM_CLASSIFIER__MAX_CHUNKS overrides classifier.max_chunks
            .add_source(
                Environment::with_prefix("REDEEM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.classifier.validate()?;

        Ok(app_config)
    }
}
