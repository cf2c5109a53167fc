use std::{collections::HashMap, env, fs, path::PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::state::window::{Position, Size};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config: {0}")]
    UnableToReadConfig(PathBuf),
    #[error("invalid toml file: {0}")]
    TomlSyntaxError(String),
    #[error("$HOME is not defined")]
    HomeNotDefined,
}

/// Padding kept between a placed window and the viewport edge.
const EDGE_PADDING: f64 = 50.0;
/// Extra headroom under the menu bar.
const MENUBAR_PADDING: f64 = 30.0;

/// Where a window lands when its app id carries a placement entry.
///
/// Ids without an entry open at their descriptor default and keep whatever
/// position the user drags them to afterwards; ids with one are snapped
/// back to the configured slot on every open.
#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStrategy {
    Default,
    TopLeft,
    TopRight,
    Centered,
}

impl PlacementStrategy {
    pub fn place(&self, default: Position, size: Size, viewport: Size) -> Position {
        match self {
            PlacementStrategy::Default => default,
            PlacementStrategy::TopLeft => Position {
                x: EDGE_PADDING + 160.0,
                y: EDGE_PADDING + MENUBAR_PADDING,
            },
            PlacementStrategy::TopRight => Position {
                x: viewport.width - size.width - EDGE_PADDING,
                y: EDGE_PADDING + MENUBAR_PADDING,
            },
            PlacementStrategy::Centered => Position {
                x: (viewport.width - size.width) / 2.0,
                y: (viewport.height - size.height) / 2.0,
            },
        }
    }
}

/// The per-app placement table, detached from the raw config so the
/// window manager does not care where the entries came from.
#[derive(Clone, Debug, Default)]
pub struct PlacementPolicy {
    overrides: HashMap<String, PlacementStrategy>,
}

impl PlacementPolicy {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_overrides(overrides: HashMap<String, PlacementStrategy>) -> Self {
        Self { overrides }
    }

    pub fn strategy_for(&self, app_id: &str) -> Option<PlacementStrategy> {
        self.overrides.get(app_id).copied()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_placement")]
    pub placement: HashMap<String, PlacementStrategy>,
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placement: default_placement(),
            dark_mode: default_dark_mode(),
        }
    }
}

impl Config {
    pub fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::from_overrides(self.placement.clone())
    }
}

fn default_dark_mode() -> bool {
    true
}

fn default_placement() -> HashMap<String, PlacementStrategy> {
    HashMap::from([
        ("terminal".to_string(), PlacementStrategy::TopLeft),
        ("resume".to_string(), PlacementStrategy::TopRight),
    ])
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let home_dir = match env::var("HOME") {
        Ok(home_dir) => home_dir,
        Err(_e) => return Err(ConfigError::HomeNotDefined),
    };
    Ok([home_dir.as_str(), ".config", "deskfolio", "deskfolio.toml"]
        .iter()
        .collect())
}

/// Load the user config, falling back to defaults when no file exists.
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = config_path()?;
    if !config_path.exists() {
        info!("no config at {config_path:?}, using defaults");
        return Ok(Config::default());
    }
    let config_content = fs::read_to_string(config_path.clone())
        .map_err(|_| ConfigError::UnableToReadConfig(config_path))?;

    let config: Config =
        toml::from_str(&config_content).map_err(|e| ConfigError::TomlSyntaxError(e.to_string()))?;
    info!("config loaded !");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size { width: 1440.0, height: 900.0 };
    const DEFAULT: Position = Position { x: 170.0, y: 110.0 };
    const SIZE: Size = Size { width: 800.0, height: 550.0 };

    #[test]
    fn strategies_place_where_advertised() {
        assert_eq!(
            PlacementStrategy::Default.place(DEFAULT, SIZE, VIEWPORT),
            DEFAULT
        );
        assert_eq!(
            PlacementStrategy::TopLeft.place(DEFAULT, SIZE, VIEWPORT),
            Position { x: 210.0, y: 80.0 }
        );
        assert_eq!(
            PlacementStrategy::TopRight.place(DEFAULT, SIZE, VIEWPORT),
            Position { x: 1440.0 - 800.0 - 50.0, y: 80.0 }
        );
        assert_eq!(
            PlacementStrategy::Centered.place(DEFAULT, SIZE, VIEWPORT),
            Position { x: 320.0, y: 175.0 }
        );
    }

    #[test]
    fn default_config_pins_terminal_and_resume() {
        let policy = Config::default().placement_policy();
        assert_eq!(policy.strategy_for("terminal"), Some(PlacementStrategy::TopLeft));
        assert_eq!(policy.strategy_for("resume"), Some(PlacementStrategy::TopRight));
        assert_eq!(policy.strategy_for("about"), None);
    }

    #[test]
    fn placement_table_parses_from_toml() {
        let config: Config = toml::from_str(
            r#"
            dark_mode = false

            [placement]
            notes = "centered"
            finder = "top-left"
            "#,
        )
        .unwrap();

        assert!(!config.dark_mode);
        let policy = config.placement_policy();
        assert_eq!(policy.strategy_for("notes"), Some(PlacementStrategy::Centered));
        assert_eq!(policy.strategy_for("finder"), Some(PlacementStrategy::TopLeft));
        // a user-supplied table replaces the built-in one
        assert_eq!(policy.strategy_for("terminal"), None);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.dark_mode);
        assert_eq!(
            config.placement_policy().strategy_for("resume"),
            Some(PlacementStrategy::TopRight)
        );
    }

    #[test]
    fn unknown_strategy_is_a_syntax_error() {
        let parsed = toml::from_str::<Config>("[placement]\nnotes = \"sideways\"");
        assert!(parsed.is_err());
    }
}
