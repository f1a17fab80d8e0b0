use serde::{Deserialize, Serialize};

use crate::render::LinkCheck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: [f32; 4],
    pub link_check: LinkCheck,
    /// Recompute the offset uniform every frame instead of once at startup.
    pub animate_offset: bool,
    /// Fixed horizontal offset; replaces the time-derived value when set.
    pub offset_x: Option<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.5, 0.5, 0.5, 1.0],
            link_check: LinkCheck::default(),
            animate_offset: false,
            offset_x: None,
        }
    }
}
