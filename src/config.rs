use crate::cli::{Cli, OutputFormat, VerbosityLevel};
use crate::liveness::{LivenessConfig, default_user_agent};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that switches liveness probing on when set to `true`
pub const VALIDATE_URLS_ENV: &str = "VALIDATE_URLS";

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub sitemaps: SitemapsConfig,
    pub liveness: LivenessSettings,
    pub output: OutputConfig,
}

/// Which files to validate and where they live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SitemapsConfig {
    /// Public directory holding the generated sitemaps
    pub directory: PathBuf,
    /// urlset files, validated in this order
    pub urlset_files: Vec<String>,
    /// Sitemap index file, validated last
    pub index_file: String,
}

/// Liveness probe configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LivenessSettings {
    /// Probe URLs with HEAD requests
    pub enabled: bool,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum number of probes in flight
    pub max_concurrent_probes: usize,
    /// User agent sent with every probe
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormatConfig,
    /// Verbose output
    pub verbose: bool,
    /// Quiet mode (errors only)
    pub quiet: bool,
}

/// Output format configuration (serializable version of CLI OutputFormat)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormatConfig {
    Human,
    Json,
}

impl From<OutputFormat> for OutputFormatConfig {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputFormatConfig::Human,
            OutputFormat::Json => OutputFormatConfig::Json,
        }
    }
}

impl From<OutputFormatConfig> for OutputFormat {
    fn from(format: OutputFormatConfig) -> Self {
        match format {
            OutputFormatConfig::Human => OutputFormat::Human,
            OutputFormatConfig::Json => OutputFormat::Json,
        }
    }
}

impl Default for SitemapsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("public"),
            urlset_files: vec![
                "sitemap.xml".to_string(),
                "vehicle-sitemap.xml".to_string(),
                "blog-sitemap.xml".to_string(),
                "accessories-sitemap.xml".to_string(),
            ],
            index_file: "sitemap-index.xml".to_string(),
        }
    }
}

impl Default for LivenessSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_seconds: 5,
            max_concurrent_probes: 16,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormatConfig::Human,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    pub fn verbosity(&self) -> VerbosityLevel {
        if self.output.quiet {
            VerbosityLevel::Quiet
        } else if self.output.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Probe settings for the liveness checker
    pub fn liveness_config(&self) -> LivenessConfig {
        LivenessConfig {
            timeout_seconds: self.liveness.timeout_seconds,
            max_concurrent_probes: self.liveness.max_concurrent_probes,
            user_agent: self.liveness.user_agent.clone(),
        }
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: defaults -> file -> environment -> CLI
    pub async fn load_config(cli: &Cli) -> Result<Config> {
        Self::load_config_with(cli, &SystemEnvProvider).await
    }

    /// Load configuration with a custom environment provider
    pub async fn load_config_with(cli: &Cli, env: &impl EnvProvider) -> Result<Config> {
        let mut config = Config::default();

        if let Some(config_path) = &cli.config {
            let file_config = Self::load_from_file(config_path).await?;
            config = Self::merge_configs(config, file_config);
        } else if let Some(found_config) = Self::find_config_file().await? {
            config = Self::merge_configs(config, found_config);
        }

        config = Self::apply_environment_overrides_with(env, config)?;
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub async fn load_from_file(path: &Path) -> Result<Config> {
        let content = tokio::fs::read_to_string(path).await?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub async fn find_config_file() -> Result<Option<Config>> {
        let config_names = [
            "validate-sitemaps.toml",
            "validate-sitemaps.json",
            ".validate-sitemaps.toml",
            ".validate-sitemaps.json",
        ];

        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(Some(Self::load_from_file(&path).await?));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("validate-sitemaps");
            for name in &config_names {
                let path = app_config_dir.join(name);
                if path.exists() {
                    return Ok(Some(Self::load_from_file(&path).await?));
                }
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        // Only the exact string "true" enables probing
        if let Some(validate_urls) = env.get(VALIDATE_URLS_ENV) {
            config.liveness.enabled = validate_urls == "true";
        }

        if let Some(dir) = env.get("VALIDATE_SITEMAPS_DIR") {
            config.sitemaps.directory = PathBuf::from(dir);
        }

        if let Some(timeout) = env.get("VALIDATE_SITEMAPS_TIMEOUT") {
            config.liveness.timeout_seconds = timeout.parse().map_err(|_| {
                ConfigError::Environment(format!(
                    "Invalid VALIDATE_SITEMAPS_TIMEOUT value: {}",
                    timeout
                ))
            })?;
        }

        if let Some(max_probes) = env.get("VALIDATE_SITEMAPS_MAX_PROBES") {
            config.liveness.max_concurrent_probes = max_probes.parse().map_err(|_| {
                ConfigError::Environment(format!(
                    "Invalid VALIDATE_SITEMAPS_MAX_PROBES value: {}",
                    max_probes
                ))
            })?;
        }

        if let Some(format) = env.get("VALIDATE_SITEMAPS_FORMAT") {
            config.output.format = match format.to_lowercase().as_str() {
                "human" => OutputFormatConfig::Human,
                "json" => OutputFormatConfig::Json,
                _ => {
                    return Err(ConfigError::Environment(format!(
                        "Invalid VALIDATE_SITEMAPS_FORMAT value: {}",
                        format
                    )));
                }
            };
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if let Some(dir) = &cli.dir {
            config.sitemaps.directory = dir.clone();
        }

        if cli.check_urls {
            config.liveness.enabled = true;
        }
        if let Some(timeout) = cli.timeout {
            config.liveness.timeout_seconds = timeout;
        }
        if let Some(max_probes) = cli.max_probes {
            config.liveness.max_concurrent_probes = max_probes;
        }

        if let Some(format) = cli.format {
            config.output.format = format.into();
        }
        if cli.verbose {
            config.output.verbose = true;
            config.output.quiet = false;
        }
        if cli.quiet {
            config.output.quiet = true;
            config.output.verbose = false;
        }

        config
    }

    /// Merge two configurations (second takes precedence)
    pub fn merge_configs(mut base: Config, override_config: Config) -> Config {
        base.sitemaps.directory = override_config.sitemaps.directory;
        if !override_config.sitemaps.urlset_files.is_empty() {
            base.sitemaps.urlset_files = override_config.sitemaps.urlset_files;
        }
        if !override_config.sitemaps.index_file.is_empty() {
            base.sitemaps.index_file = override_config.sitemaps.index_file;
        }

        base.liveness = override_config.liveness;
        base.output = override_config.output;

        base
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if config.liveness.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if config.liveness.max_concurrent_probes == 0 {
            return Err(ConfigError::Validation(
                "Maximum concurrent probes must be greater than 0".to_string(),
            ));
        }
        if config.liveness.max_concurrent_probes > 1000 {
            return Err(ConfigError::Validation(
                "Maximum concurrent probes cannot exceed 1000".to_string(),
            ));
        }

        if config.output.verbose && config.output.quiet {
            return Err(ConfigError::Validation(
                "Cannot enable both verbose and quiet modes".to_string(),
            ));
        }

        if config.sitemaps.urlset_files.is_empty() {
            return Err(ConfigError::Validation(
                "At least one urlset file must be specified".to_string(),
            ));
        }

        let names = config
            .sitemaps
            .urlset_files
            .iter()
            .chain(std::iter::once(&config.sitemaps.index_file));
        for name in names {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(ConfigError::Validation(format!(
                    "Invalid sitemap file name: '{}'",
                    name
                )));
            }
        }

        Ok(())
    }
}
