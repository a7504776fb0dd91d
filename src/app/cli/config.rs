//! TOML configuration file discovery and loading
//!
//! Values from the file only fill in what the command line left unset, so
//! the effective precedence is defaults < config file < command line.

use crate::app::cli::args::Args;
use crate::app::cli::error::{ConfigError, ConfigResult};
use crate::app::output::ReportFormat;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "Ringq";
const CONFIG_FILE_NAME: &str = "ringq.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["text", "ext", "json"];

const KNOWN_KEYS: &[&str] = &[
    "capacity",
    "producers",
    "consumers",
    "items",
    "grace-ms",
    "runs",
    "record",
    "work-every",
    "work-pause-us",
    "output",
    "color",
    "log-level",
    "log-format",
    "log-file",
];

/// `<config_dir>/Ringq/ringq.toml`, whether or not it exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Args {
    /// Pick the file to load: an explicit path must exist, the default is optional
    pub fn resolve_config_path(&self) -> ConfigResult<Option<PathBuf>> {
        match &self.config_file {
            Some(path) if path.exists() => Ok(Some(path.clone())),
            Some(path) => Err(ConfigError::NotFound { path: path.clone() }),
            None => Ok(default_config_path().filter(|path| path.exists())),
        }
    }

    pub fn load_config_file(path: &Path) -> ConfigResult<toml::Table> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<toml::Table>(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load and apply the config file, returning the path that was used
    pub fn apply_config_file(&mut self) -> ConfigResult<Option<PathBuf>> {
        let Some(path) = self.resolve_config_path()? else {
            return Ok(None);
        };
        let config = Self::load_config_file(&path)?;
        self.apply_toml_values(&config)?;
        Ok(Some(path))
    }

    /// Apply TOML configuration values to fields not set on the command line
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> ConfigResult<()> {
        if let Some(key) = config.keys().find(|key| !KNOWN_KEYS.contains(&key.as_str())) {
            return Err(ConfigError::UnknownKey { key: key.clone() });
        }

        fill(&mut self.capacity, get_usize(config, "capacity")?);
        fill(&mut self.producers, get_usize(config, "producers")?);
        fill(&mut self.consumers, get_usize(config, "consumers")?);
        fill(&mut self.items, get_u64(config, "items")?);
        fill(&mut self.grace_ms, get_u64(config, "grace-ms")?);
        fill(&mut self.runs, get_usize(config, "runs")?);
        fill(&mut self.work_every, get_u64(config, "work-every")?);
        fill(&mut self.work_pause_us, get_u64(config, "work-pause-us")?);

        if get_bool(config, "record")? == Some(true) {
            self.record = true;
        }

        if !self.color && !self.no_color {
            match get_bool(config, "color")? {
                Some(true) => self.color = true,
                Some(false) => self.no_color = true,
                None => {}
            }
        }

        if let Some(output) = get_str(config, "output")? {
            if ReportFormat::from_name(output).is_none() {
                return Err(invalid_choice("output", output, &ReportFormat::names()));
            }
            fill(&mut self.output, Some(output.to_lowercase()));
        }
        if let Some(level) = get_str(config, "log-level")? {
            if !LOG_LEVELS.contains(&level) {
                return Err(invalid_choice("log-level", level, LOG_LEVELS));
            }
            fill(&mut self.log_level, Some(level.to_string()));
        }
        if let Some(format) = get_str(config, "log-format")? {
            if !LOG_FORMATS.contains(&format) {
                return Err(invalid_choice("log-format", format, LOG_FORMATS));
            }
            fill(&mut self.log_format, Some(format.to_string()));
        }
        fill(
            &mut self.log_file,
            get_str(config, "log-file")?.map(PathBuf::from),
        );

        Ok(())
    }
}

fn fill<T>(target: &mut Option<T>, value: Option<T>) {
    if target.is_none() {
        *target = value;
    }
}

fn invalid_type(key: &str, expected: &str, found: &toml::Value) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected {}, found {}", expected, found.type_str()),
    }
}

fn invalid_choice(key: &str, value: &str, choices: &[&str]) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{}' is not one of: {}", value, choices.join(", ")),
    }
}

fn get_u64(config: &toml::Table, key: &str) -> ConfigResult<Option<u64>> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::Integer(n)) => {
            u64::try_from(*n)
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must not be negative, found {}", n),
                })
        }
        Some(other) => Err(invalid_type(key, "integer", other)),
    }
}

fn get_usize(config: &toml::Table, key: &str) -> ConfigResult<Option<usize>> {
    get_u64(config, key)?
        .map(|n| {
            usize::try_from(n).map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{} is too large", n),
            })
        })
        .transpose()
}

fn get_bool(config: &toml::Table, key: &str) -> ConfigResult<Option<bool>> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
        Some(other) => Err(invalid_type(key, "boolean", other)),
    }
}

fn get_str<'a>(config: &'a toml::Table, key: &str) -> ConfigResult<Option<&'a str>> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(invalid_type(key, "string", other)),
    }
}
