// Configuration loading and validation (config/fieldglass.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use fieldglass_core::level::LevelFilter;

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "fieldglass.toml";

/// Environment variable replacing `api.base_url`.
pub const BASE_URL_ENV: &str = "FIELDGLASS_API_BASE_URL";

const BUILTIN_DEFAULTS: &str = include_str!("../defaults/fieldglass.toml");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for fieldglass.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    api: ApiConfig,
    display: DisplaySection,
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct DisplaySection {
    default_level: String,
    compare_table_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub default_level: LevelFilter,
    pub compare_table_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub directory: String,
}

/// Assembled, validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    /// Directory holding `config/`; relative paths resolve against it.
    pub base_dir: PathBuf,
}

impl Config {
    pub fn log_dir(&self) -> PathBuf {
        let dir = Path::new(&self.logging.directory);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.base_dir.join(dir)
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/fieldglass.toml` under `base_dir`, applying
/// `base_url_override` when set.
///
/// Does not copy defaults; `load_config()` handles that.
pub(crate) fn load_config_from(
    base_dir: &Path,
    base_url_override: Option<String>,
) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let mut file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    if let Some(url) = base_url_override.filter(|u| !u.trim().is_empty()) {
        file.api.base_url = url;
    }

    let default_level =
        file.display
            .default_level
            .parse()
            .map_err(|e: fieldglass_core::ParseLevelError| ConfigError::ValidationError {
                field: "display.default_level".into(),
                message: e.to_string(),
            })?;

    let config = Config {
        api: file.api,
        display: DisplayConfig {
            default_level,
            compare_table_width: file.display.compare_table_width,
        },
        logging: file.logging,
        base_dir: base_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/fieldglass.toml` exists. Missing files are copied from
/// `defaults/` (never overwriting, skipping `*.example`); without a
/// `defaults/` directory the built-in defaults are written instead.
/// Returns the files that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    if !defaults_dir.is_dir() {
        let target = config_dir.join(CONFIG_FILE);
        return match write_new(&target, BUILTIN_DEFAULTS.as_bytes())? {
            true => Ok(vec![target]),
            false => Ok(vec![]),
        };
    }

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }
        let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        if write_new(&target, &content)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Create `target` with `content` unless it already exists. `Ok(false)` when
/// the file was already there.
fn write_new(target: &Path, content: &[u8]) -> Result<bool, ConfigError> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Directory the app treats as home: the working directory when it holds
/// `config/` or `defaults/`, otherwise the platform config directory.
pub fn resolve_base_dir() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        return Ok(cwd);
    }
    directories::ProjectDirs::from("", "", "fieldglass")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ConfigError::DefaultsCopyError {
            message: "no home directory available for the platform config directory".into(),
        })
}

/// Resolve the base directory, copy defaults, load, validate.
pub fn load_config() -> Result<Config, ConfigError> {
    let base_dir = resolve_base_dir()?;
    ensure_config_files(&base_dir)?;
    load_config_from(&base_dir, std::env::var(BASE_URL_ENV).ok())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.api.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got `{url}`"),
        });
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    let width = config.display.compare_table_width;
    if width < 20 {
        return Err(ConfigError::ValidationError {
            field: "display.compare_table_width".into(),
            message: format!("must be at least 20, got {width}"),
        });
    }

    if config.logging.directory.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.directory".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
