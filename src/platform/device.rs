//! Device emulation presets for deterministic tests and the CLI

use crate::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceMetrics {
    pub width: u32,
    pub height: u32,
    pub dpr: f32,
    pub touch: bool,
}

impl DeviceMetrics {
    pub fn desktop() -> Self {
        DeviceMetrics { width: 1280, height: 720, dpr: 1.0, touch: false }
    }

    pub fn tablet() -> Self {
        DeviceMetrics { width: 820, height: 1180, dpr: 2.0, touch: true }
    }

    pub fn phone() -> Self {
        DeviceMetrics { width: 390, height: 844, dpr: 3.0, touch: true }
    }

    /// Look up a preset by name (`desktop`, `tablet`, `phone`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "desktop" => Some(Self::desktop()),
            "tablet" => Some(Self::tablet()),
            "phone" | "mobile" => Some(Self::phone()),
            _ => None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport { width: self.width, height: self.height }
    }
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self::desktop()
    }
}
