use crate::consts;
use crate::game::Settings;
use crate::util;
use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub(crate) struct Config {
    /// Board dimensions & speed
    #[serde(default)]
    pub(crate) board: BoardConfig,

    /// Colors of the checkerboard
    #[serde(default)]
    pub(crate) colors: ColorConfig,

    /// Settings about data & log files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Load the configuration from `path` if given, or else from the default
    /// configuration file, which is allowed to not exist.
    pub(crate) fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(p) => Config::load(p, false),
            None => {
                let p = util::config_file_path().ok_or(ConfigError::NoPath)?;
                Config::load(&p, true)
            }
        }
    }

    /// Return the filepath at which high scores should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// scores path.  Returns `None` if saving high scores is disabled or no
    /// path could be determined.
    pub(crate) fn high_scores_file(&self) -> Option<PathBuf> {
        if !self.files.save_high_scores {
            return None;
        }
        self.files
            .high_scores_file
            .clone()
            .or_else(util::high_scores_file_path)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct BoardConfig {
    pub(crate) width: i32,
    pub(crate) height: i32,
    /// Seconds between movement steps
    pub(crate) movement_interval: f64,
}

impl BoardConfig {
    /// Convert to game settings.  The dimensions are checked against what the
    /// screen can display; whether the board contains the starting node is
    /// validated when the game is created.
    pub(crate) fn settings(&self) -> Result<Settings, ConfigError> {
        let fits = |n: i32, max: u16| u16::try_from(n).is_ok_and(|n| (1..=max).contains(&n));
        if !fits(self.width, consts::MAX_WIDTH) || !fits(self.height, consts::MAX_HEIGHT) {
            return Err(ConfigError::BoardSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(Settings {
            width: self.width,
            height: self.height,
            movement_interval: interval_from_secs(self.movement_interval)?,
        })
    }
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            width: consts::DEFAULT_WIDTH,
            height: consts::DEFAULT_HEIGHT,
            movement_interval: consts::DEFAULT_MOVEMENT_INTERVAL.as_secs_f64(),
        }
    }
}

fn interval_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    // Negative and NaN values fail the conversion; values below a nanosecond
    // round down to zero
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or(ConfigError::Interval(secs))
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct ColorConfig {
    /// Color of the cells whose coordinates have the same parity
    pub(crate) light: Color,
    /// Color of the other cells
    pub(crate) dark: Color,
}

impl Default for ColorConfig {
    fn default() -> ColorConfig {
        ColorConfig {
            light: consts::DEFAULT_LIGHT_COLOR,
            dark: consts::DEFAULT_DARK_COLOR,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    pub(crate) high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    pub(crate) save_high_scores: bool,

    /// File to write logs to; no logs are written if this is not set
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid movement interval {0}: must be a positive number of seconds")]
    Interval(f64),
    #[error(
        "board size {width}x{height} does not fit on the screen: width must be between 1 and {max_width} and height between 1 and {max_height}",
        max_width = consts::MAX_WIDTH,
        max_height = consts::MAX_HEIGHT
    )]
    BoardSize { width: i32, height: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(src: &str) -> Result<Config, ConfigError> {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(src.as_bytes()).unwrap();
        tmp.flush().unwrap();
        Config::load(tmp.path(), false)
    }

    #[test]
    fn empty_file() {
        assert_eq!(load_str("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let cfg = load_str(concat!(
            "[board]\n",
            "width = 20\n",
            "height = 10\n",
            "movement-interval = 0.25\n",
            "\n",
            "[colors]\n",
            "light = \"white\"\n",
            "dark = \"#102030\"\n",
            "\n",
            "[files]\n",
            "high-scores-file = \"/tmp/scores.json\"\n",
            "save-high-scores = false\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                board: BoardConfig {
                    width: 20,
                    height: 10,
                    movement_interval: 0.25,
                },
                colors: ColorConfig {
                    light: Color::White,
                    dark: Color::Rgb(0x10, 0x20, 0x30),
                },
                files: FileConfig {
                    high_scores_file: Some(PathBuf::from("/tmp/scores.json")),
                    save_high_scores: false,
                    log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
                },
            }
        );
        assert_eq!(cfg.high_scores_file(), None);
        assert_eq!(
            cfg.board.settings().unwrap(),
            Settings {
                width: 20,
                height: 10,
                movement_interval: Duration::from_millis(250),
            }
        );
    }

    #[test]
    fn partial_board() {
        let cfg = load_str("[board]\nwidth = 30\n").unwrap();
        assert_eq!(cfg.board.width, 30);
        assert_eq!(cfg.board.height, consts::DEFAULT_HEIGHT);
        assert_eq!(
            cfg.board.settings().unwrap().movement_interval,
            consts::DEFAULT_MOVEMENT_INTERVAL
        );
    }

    #[test]
    fn configured_high_scores_file() {
        let cfg = load_str("[files]\nhigh-scores-file = \"scores.json\"\n").unwrap();
        assert_eq!(cfg.high_scores_file(), Some(PathBuf::from("scores.json")));
    }

    #[test]
    fn bad_toml() {
        assert!(matches!(
            load_str("[board\nwidth = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_type() {
        assert!(matches!(
            load_str("[board]\nwidth = \"wide\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[rstest::rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(1e-12)]
    fn bad_interval(#[case] secs: f64) {
        let board = BoardConfig {
            movement_interval: secs,
            ..BoardConfig::default()
        };
        assert!(matches!(board.settings(), Err(ConfigError::Interval(_))));
    }

    #[rstest::rstest]
    #[case(40, 15)]
    #[case(17, 20)]
    #[case(17, 30)]
    #[case(65535, 65535)]
    #[case(0, 15)]
    #[case(17, -1)]
    fn board_too_big_for_screen(#[case] width: i32, #[case] height: i32) {
        let board = BoardConfig {
            width,
            height,
            ..BoardConfig::default()
        };
        assert!(matches!(
            board.settings(),
            Err(ConfigError::BoardSize { width: w, height: h }) if w == width && h == height
        ));
    }

    #[test]
    fn largest_board() {
        let board = BoardConfig {
            width: 39,
            height: 19,
            ..BoardConfig::default()
        };
        let settings = board.settings().unwrap();
        assert_eq!((settings.width, settings.height), (39, 19));
    }
}
