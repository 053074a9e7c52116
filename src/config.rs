//! Settings file.
//!
//! `daycal.toml` is looked for in the working directory unless a path is
//! given on the command line.  Every key is optional; unknown keys are
//! ignored.
//!
//! ```toml
//! all_days_selectable = true
//! min_date = "2020-01-01"
//! max_date = "2030-12-31"
//! moon_phases = true
//! disable_weekends = false
//! selection_color = "magenta"
//!
//! [[highlight]]
//! date = "2025-12-25"
//! color = "red"
//! background = "#202020"
//! bold = true
//! disabled = false
//! selectable = false
//! ```

use crate::calendar::DateBounds;
use crate::decorators::{Highlight, Highlights};
use ratatui::style::{Color, ParseColorError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;
use time::{macros::format_description, Date};

pub(crate) const DEFAULT_CONFIG_FILE: &str = "daycal.toml";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct ConfigFile {
    all_days_selectable: bool,
    min_date: Option<String>,
    max_date: Option<String>,
    moon_phases: bool,
    disable_weekends: bool,
    selection_color: Option<String>,
    #[serde(rename = "highlight")]
    highlights: Vec<HighlightEntry>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            all_days_selectable: true,
            min_date: None,
            max_date: None,
            moon_phases: true,
            disable_weekends: false,
            selection_color: None,
            highlights: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
struct HighlightEntry {
    date: String,
    color: Option<String>,
    background: Option<String>,
    #[serde(default)]
    bold: bool,
    disabled: Option<bool>,
    selectable: Option<bool>,
}

/// Validated settings
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Config {
    pub(crate) all_days_selectable: bool,
    pub(crate) bounds: DateBounds,
    pub(crate) moon_phases: bool,
    pub(crate) disable_weekends: bool,
    pub(crate) selection_color: Option<Color>,
    pub(crate) highlights: Highlights,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            all_days_selectable: true,
            bounds: DateBounds::default(),
            moon_phases: true,
            disable_weekends: false,
            selection_color: None,
            highlights: Highlights::new(),
        }
    }
}

impl Config {
    /// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] if `path`
    /// is `None`.  A missing default file yields the default settings; a
    /// missing explicit file is an error.
    pub(crate) fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
                tracing::info!(target: "config", path = %path.display(), "no config file; using defaults");
                return Ok(Config::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let config = Config::from_toml(&content)?;
        tracing::info!(
            target: "config",
            path = %path.display(),
            all_days_selectable = config.all_days_selectable,
            min_date = ?config.bounds.min,
            max_date = ?config.bounds.max,
            moon_phases = config.moon_phases,
            disable_weekends = config.disable_weekends,
            "config loaded"
        );
        Ok(config)
    }

    pub(crate) fn from_toml(s: &str) -> Result<Config, ConfigError> {
        let file = toml::from_str::<ConfigFile>(s)?;
        let bounds = DateBounds {
            min: file
                .min_date
                .as_deref()
                .map(|s| parse_date("min_date", s))
                .transpose()?,
            max: file
                .max_date
                .as_deref()
                .map(|s| parse_date("max_date", s))
                .transpose()?,
        };
        check_bounds(bounds)?;
        let mut highlights = Highlights::new();
        for entry in file.highlights {
            let date = parse_date("highlight.date", &entry.date)?;
            let highlight = Highlight {
                color: entry.color.as_deref().map(parse_color).transpose()?,
                background: entry.background.as_deref().map(parse_color).transpose()?,
                bold: entry.bold,
                disabled: entry.disabled,
                selectable: entry.selectable,
            };
            highlights.insert(date, highlight);
        }
        Ok(Config {
            all_days_selectable: file.all_days_selectable,
            bounds,
            moon_phases: file.moon_phases,
            disable_weekends: file.disable_weekends,
            selection_color: file.selection_color.as_deref().map(parse_color).transpose()?,
            highlights,
        })
    }

    /// Replace whichever ends of the date range are given, rejecting a range
    /// that would leave no day enabled.
    pub(crate) fn override_bounds(
        &mut self,
        min: Option<Date>,
        max: Option<Date>,
    ) -> Result<(), ConfigError> {
        let bounds = DateBounds {
            min: min.or(self.bounds.min),
            max: max.or(self.bounds.max),
        };
        check_bounds(bounds)?;
        self.bounds = bounds;
        Ok(())
    }
}

fn check_bounds(bounds: DateBounds) -> Result<(), ConfigError> {
    match (bounds.min, bounds.max) {
        (Some(min), Some(max)) if min > max => Err(ConfigError::EmptyRange { min, max }),
        _ => Ok(()),
    }
}

/// Parse a date in `YYYY-MM-DD` form
pub(crate) fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}

fn parse_date(field: &'static str, value: &str) -> Result<Date, ConfigError> {
    parse_ymd(value).map_err(|source| ConfigError::Date {
        field,
        value: value.to_owned(),
        source,
    })
}

fn parse_color(value: &str) -> Result<Color, ConfigError> {
    value.parse::<Color>().map_err(|source| ConfigError::Color {
        value: value.to_owned(),
        source,
    })
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid date {value:?} for {field}")]
    Date {
        field: &'static str,
        value: String,
        source: time::error::Parse,
    },
    #[error("invalid color {value:?}")]
    Color {
        value: String,
        source: ParseColorError,
    },
    #[error("min_date {min} is after max_date {max}")]
    EmptyRange { min: Date, max: Date },
}
