//! Demo configuration: which canvas, shaders, and image to use.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! reproduces the stock demo.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CANVAS_ID: &str = "gl-canvas";
pub const DEFAULT_VERTEX_SHADER_ID: &str = "vertex-shader";
pub const DEFAULT_FRAGMENT_SHADER_ID: &str = "fragment-shader";
pub const DEFAULT_IMAGE_PATH: &str = "webgl.png";
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.5, 0.2, 0.4, 0.8];

/// Identifiers and constants for one run of the demo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub canvas_id: String,
    pub vertex_shader_id: String,
    pub fragment_shader_id: String,
    /// Image path, resolved relative to the page.
    pub image_path: String,
    /// RGBA clear color, each channel in [0, 1].
    pub clear_color: [f32; 4],
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            vertex_shader_id: DEFAULT_VERTEX_SHADER_ID.to_string(),
            fragment_shader_id: DEFAULT_FRAGMENT_SHADER_ID.to_string(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }
}

impl DemoConfig {
    /// Parses a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(|e| RenderError::Config(e.to_string()))
    }
}
