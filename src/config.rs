//! Конфигурация HUD в TOML.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Ошибка ввода-вывода конфига '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Не удалось разобрать TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Не удалось записать TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Настройки HUD.
///
/// Отсутствующие в файле поля берутся из значений по умолчанию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HudConfig {
    /// Число прогонов Монте-Карло на одну оценку эквити.
    pub equity_trials: usize,
    pub parallel_equity: bool,
    pub equity_workers: usize,
    /// Сколько снимков хранит история отмены.
    pub history_capacity: usize,
    /// Куда пишется документ статуса.
    pub autosave_path: PathBuf,
    /// Seed для воспроизводимой раздачи и эквити.
    pub rng_seed: Option<u64>,
    /// Докладывать борд до шоудауна, когда ходить больше некому.
    pub runout_on_no_actor: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            equity_trials: 1000,
            parallel_equity: false,
            equity_workers: 4,
            history_capacity: 10,
            autosave_path: PathBuf::from("status.json"),
            rng_seed: None,
            runout_on_no_actor: true,
        }
    }
}

impl HudConfig {
    /// Прочитать конфиг; если файла нет – создать его со значениями по умолчанию.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if path.exists() {
            let text = fs::read_to_string(path).map_err(io_err)?;
            return Ok(toml::from_str(&text)?);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let cfg = HudConfig::default();
        let text = toml::to_string_pretty(&cfg)?;
        fs::write(path, text).map_err(io_err)?;
        info!("default config written to '{}'", path.display());
        Ok(cfg)
    }

    /// Часть конфига, которая нужна движку.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            runout_on_no_actor: self.runout_on_no_actor,
            equity_trials: self.equity_trials,
            parallel_equity: self.parallel_equity,
            equity_workers: self.equity_workers.max(1),
        }
    }
}
