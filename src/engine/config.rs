#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for opening a [`StereoEngine`](crate::engine::StereoEngine).
///
/// Everything has a usable default; the builder methods override one field
/// at a time.
///
/// # Example
/// ```
/// use duotone::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .default_frequency(220.0)
///     .default_volume(0.25);
/// assert_eq!(config.default_frequency, 220.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Output device name. `None` picks the host's default output device.
    pub output_device: Option<String>,
    /// Preferred sample rate in Hz. `None` keeps the device default.
    pub sample_rate: Option<u32>,
    /// Fixed device buffer size in frames. `None` lets the host decide.
    pub buffer_size: Option<u32>,
    /// Frequency both channels hold before the first retune.
    pub default_frequency: f32,
    /// Shared starting volume for both channels, clamped to `[0, 1]`.
    pub default_volume: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_device: None,
            sample_rate: None,
            buffer_size: None,
            default_frequency: 440.0,
            default_volume: 0.5,
        }
    }
}

impl EngineConfig {
    pub fn output_device(mut self, name: impl Into<String>) -> Self {
        self.output_device = Some(name.into());
        self
    }

    pub fn sample_rate(mut self, hz: u32) -> Self {
        self.sample_rate = Some(hz);
        self
    }

    pub fn buffer_size(mut self, frames: u32) -> Self {
        self.buffer_size = Some(frames);
        self
    }

    pub fn default_frequency(mut self, hz: f32) -> Self {
        self.default_frequency = hz;
        self
    }

    pub fn default_volume(mut self, volume: f32) -> Self {
        self.default_volume = volume;
        self
    }
}
