use crate::gui::menu::{MenuError, RadialMenu};
use carriot_link::{CommandId, Speed};
use config::builder::DefaultState;
use config::{ConfigBuilder, FileFormat};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub default_speed: Speed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentConfig {
    pub label: String,
    pub command: CommandId,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WheelConfig {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub angle_offset: f64,
    pub hover_rate: f64,
    pub center_command: CommandId,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpinConfig {
    pub left: CommandId,
    pub right: CommandId,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    pub device_id: u32,
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    pub wheel: WheelConfig,
    pub spin: SpinConfig,
    pub history: HistoryConfig,
    pub monitor: MonitorConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error(transparent)]
    Wheel(#[from] MenuError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("online", "carriot", "carriot").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn base_builder() -> ConfigBuilder<DefaultState> {
    config::Config::builder().add_source(config::File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

pub fn default_config() -> Result<Config, ConfigError> {
    Ok(base_builder().build()?.try_deserialize()?)
}

/// Built-in defaults, then the user file, then `CARRIOT__SECTION__KEY` variables.
pub fn load_config() -> Result<Config, ConfigError> {
    load_layered(&get_config_path()?, None)
}

/// `env` replaces the process environment when given.
fn load_layered(
    path: &Path,
    env: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let s = base_builder()
        .add_source(config::File::from(path.to_path_buf()).required(false))
        .add_source(
            config::Environment::with_prefix("CARRIOT")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Writes the default file on first start, then loads. A broken user config falls
/// back to the built-in defaults.
pub fn load_or_setup() -> Result<Config, ConfigError> {
    match get_config_path() {
        Ok(path) => load_or_setup_at(&path, None),
        Err(e) => {
            log::error!("{}, using defaults", e);
            default_config()
        }
    }
}

fn load_or_setup_at(
    path: &Path,
    env: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    if !path.exists() {
        match write_default_config_to(path) {
            Ok(path) => log::info!("Wrote default configuration to {}", path.display()),
            Err(e) => log::warn!("Could not write default configuration: {}", e),
        }
    }

    match load_layered(path, env) {
        Ok(c) => Ok(c),
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            default_config()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    write_default_config_to(&get_config_path()?)
}

/// Never overwrites an existing file.
fn write_default_config_to(path: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

/// Builds the wheel from `config`. An invalid wheel is replaced by the built-in one,
/// both in the returned menu and in `config.wheel`.
pub fn build_wheel(config: &mut Config) -> Result<RadialMenu, ConfigError> {
    match RadialMenu::new(&config.wheel) {
        Ok(menu) => Ok(menu),
        Err(e) => {
            log::error!("Invalid wheel configuration, using the default wheel: {}", e);
            config.wheel = default_config()?.wheel;
            Ok(RadialMenu::new(&config.wheel)?)
        }
    }
}

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
