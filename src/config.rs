//! Tunable constants of the layout, renderer and editor.
//!
//! Every section and field has a default, so a configuration file only needs
//! the values it changes:
//!
//! ```toml
//! [layout]
//! entity_radius = 60.0
//!
//! [interaction]
//! confirm_deletes = true
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::Error;

/// Configuration file looked up in the working directory when none is given.
pub const LOCAL_CONFIG_FILE: &str = "sqlerd.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub interaction: InteractionConfig,
}

/// Surface size used by the command line when no size is given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub entity_radius: f64,
    pub attribute_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            entity_radius: 50.0,
            attribute_radius: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub arrow_head_length: f64,
    /// Pixels per character cell for the text backend.
    pub cell_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            arrow_head_length: 10.0,
            cell_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// How close to a node's rim a press must land to start resizing.
    pub resize_tolerance: f64,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub confirm_deletes: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            resize_tolerance: 5.0,
            zoom_step: 0.1,
            min_zoom: 0.5,
            max_zoom: 2.0,
            confirm_deletes: false,
        }
    }
}

/// Loads the configuration from `explicit_path`, or from
/// [`LOCAL_CONFIG_FILE`] if it exists, or falls back to defaults.
///
/// # Errors
///
/// Returns an error if an explicit path is missing, or if the chosen file
/// cannot be read or parsed.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, Error> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        if !path.exists() {
            return Err(Error::MissingConfig(path.to_path_buf()));
        }
        return load_config_file(path);
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        info!(path = LOCAL_CONFIG_FILE; "Loading configuration from local path");
        return load_config_file(local);
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, Error> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, Error> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}
