//! Planner configuration.
//!
//! Read from an optional TOML file at ~/.config/neuron-calendar/config.toml.
//! Every key has a default, so a missing file is the same as an empty one.

use anyhow::{Context, Result};
use config::{Config, File};
use neuron_core::{SlotGeometry, View, ViewOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

static APP_DIR: &str = "neuron-calendar";
static EVENTS_FILE: &str = "events.json";
static FALLBACK_DATA_FILE: &str = "~/.neuron-calendar/events.json";

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(EVENTS_FILE))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_FILE))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Where events are stored. `~` is expanded.
    pub data_file: PathBuf,

    /// View shown at startup.
    pub default_view: View,

    /// Event chips per month cell before the "+N" overflow.
    pub month_cell_limit: usize,

    /// Pixels per hour on the week and day time axis.
    pub hour_height: f32,

    /// Smallest height of a timed event, in pixels.
    pub min_event_height: f32,

    /// Days listed by the upcoming sidebar, today included.
    pub upcoming_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let options = ViewOptions::default();
        PlannerConfig {
            data_file: default_data_file(),
            default_view: View::default(),
            month_cell_limit: options.month_cell_limit,
            hour_height: options.geometry.hour_height,
            min_event_height: options.geometry.min_event_height,
            upcoming_days: options.upcoming_days,
        }
    }
}

impl PlannerConfig {
    /// Get the config file path (~/.config/neuron-calendar/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults for a missing file or keys.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: PlannerConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .with_context(|| format!("Failed to read config file at {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hour_height.is_nan() || self.hour_height <= 0.0 {
            anyhow::bail!("hour_height must be positive, got {}", self.hour_height);
        }
        if self.min_event_height < 0.0 {
            anyhow::bail!(
                "min_event_height must not be negative, got {}",
                self.min_event_height
            );
        }
        Ok(())
    }

    /// The events file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            month_cell_limit: self.month_cell_limit,
            geometry: SlotGeometry {
                hour_height: self.hour_height,
                min_event_height: self.min_event_height,
            },
            upcoming_days: self.upcoming_days,
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let defaults = PlannerConfig::default();
        let contents = format!(
            "\
# neuron-calendar configuration

# Where events are stored:
# data_file = \"{}\"

# View shown at startup (month, week or day):
# default_view = \"month\"

# Events shown per month cell before \"+N more\":
# month_cell_limit = {}

# Time axis scale, in pixels:
# hour_height = {:.1}
# min_event_height = {:.1}

# Days covered by the upcoming list:
# upcoming_days = {}
",
            defaults.data_file.display(),
            defaults.month_cell_limit,
            defaults.hour_height,
            defaults.min_event_height,
            defaults.upcoming_days,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;

        Ok(())
    }
}
