use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crossterm::style::Color;
use mazepath::generator::DEFAULT_OBSTACLE_CHANCE;
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings file ({path:?}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file ({path:?}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub passable: Color,
    pub blocked: Color,
    pub path: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            passable: Color::White,
            blocked: Color::DarkGrey,
            path: Color::Red,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub color_scheme: Option<ColorScheme>,
    #[serde(default)]
    pub obstacle_chance: Option<f64>,
    #[serde(default)]
    pub delimiter: Option<char>,
    #[serde(default)]
    pub default_size: Option<usize>,
}

impl Settings {
    pub fn populate(mut self) -> Self {
        self.color_scheme = Some(self.get_color_scheme());
        self.obstacle_chance = Some(self.get_obstacle_chance());
        self.delimiter = Some(self.get_delimiter());
        self.default_size = Some(self.get_default_size());

        self
    }

    pub fn get_color_scheme(&self) -> ColorScheme {
        self.color_scheme.unwrap_or_default()
    }

    pub fn get_obstacle_chance(&self) -> f64 {
        self.obstacle_chance.unwrap_or(DEFAULT_OBSTACLE_CHANCE)
    }

    pub fn get_delimiter(&self) -> char {
        self.delimiter.unwrap_or(mazepath::loader::DEFAULT_DELIMITER)
    }

    pub fn get_default_size(&self) -> usize {
        self.default_size.unwrap_or(10)
    }

    pub fn default_path() -> PathBuf {
        constants::settings_path()
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, SettingsError> {
        Self::options()
            .from_str(text)
            .map_err(|source| SettingsError::Parse {
                path: path.to_owned(),
                source,
            })
    }

    /// Loads settings from `path`, writing the defaults there first if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_owned(),
            source,
        };

        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Settings file not found, creating default at {:?}", path);
                Self::reset_config(path)?;
                Self::parse(DEFAULT_SETTINGS, path)
            }
            Err(err) => Err(io_err(err)),
        }
    }

    /// Loads settings, falling back to defaults when the file can't be used.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("{}, using default settings", err);
            Self::default()
        })
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_owned(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }
}
