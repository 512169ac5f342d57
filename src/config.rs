/// Tunable game constants.
///
/// Every field has a default matching the classic two-player layout, so an
/// empty JSON object (or no config file at all) yields the standard game.
/// Command-line flags are applied on top of whatever the file provides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::entities::Hitbox;
use crate::error::GameError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Logical world size; the renderer scales it onto the terminal.
    pub width: f32,
    pub height: f32,
    /// World units per frame while a steering key is held.
    pub ship_speed: f32,
    /// World units per frame for every laser.
    pub laser_speed: f32,
    pub max_health: u32,
    /// Ships are clamped to `[ship_margin, width - ship_margin]`.
    pub ship_margin: f32,
    /// Distance of each ship's centre from its own edge of the screen.
    pub ship_offset_y: f32,
    /// Vertical distance from a ship's centre to where its lasers spawn.
    pub muzzle_offset: f32,
    pub ship_hitbox: Hitbox,
    pub laser_hitbox: Hitbox,
    /// Maximum lasers in flight per side; `None` means unlimited.
    pub laser_cap: Option<usize>,
    pub frame_millis: u64,
    pub assets_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            ship_speed: 5.0,
            laser_speed: 10.0,
            max_health: 3,
            ship_margin: 50.0,
            ship_offset_y: 35.0,
            muzzle_offset: 50.0,
            ship_hitbox: Hitbox {
                half_width: 37.0,
                half_height: 28.0,
            },
            laser_hitbox: Hitbox {
                half_width: 4.0,
                half_height: 20.0,
            },
            laser_cap: None,
            frame_millis: 16,
            assets_dir: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.width <= 2.0 * self.ship_margin {
            return Err(GameError::InvalidConfig(format!(
                "width {} leaves no room between the {} unit margins",
                self.width, self.ship_margin
            )));
        }
        if self.height <= 2.0 * self.ship_offset_y {
            return Err(GameError::InvalidConfig(format!(
                "height {} is too small for ships placed {} units from each edge",
                self.height, self.ship_offset_y
            )));
        }
        if self.ship_speed <= 0.0 || self.laser_speed <= 0.0 {
            return Err(GameError::InvalidConfig(
                "ship_speed and laser_speed must be positive".to_string(),
            ));
        }
        if self.max_health == 0 {
            return Err(GameError::InvalidConfig("max_health must be at least 1".to_string()));
        }
        if self.frame_millis == 0 {
            return Err(GameError::InvalidConfig("frame_millis must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Directory the text-art assets are read from.
    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("space_duel.log"))
    }

    /// Apply command-line flags (program name already stripped).
    ///
    /// `--config` is read first so the remaining flags override the file.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, GameError> {
        let args: Vec<String> = args.into_iter().collect();

        let mut config = match flag_value(&args, "--config")? {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::default(),
        };

        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .ok_or_else(|| GameError::Usage(format!("{} needs a value", flag)))
            };
            match flag.as_str() {
                "--config" => {
                    value()?;
                }
                "--assets" => config.assets_dir = Some(PathBuf::from(value()?)),
                "--laser-cap" => {
                    let raw = value()?;
                    let cap = raw
                        .parse::<usize>()
                        .map_err(|_| GameError::Usage(format!("invalid laser cap: {}", raw)))?;
                    config.laser_cap = Some(cap);
                }
                other => return Err(GameError::Usage(format!("unknown argument: {}", other))),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, GameError> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| GameError::Usage(format!("{} needs a value", flag))),
        None => Ok(None),
    }
}
