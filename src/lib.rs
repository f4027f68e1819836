pub mod dsp;
pub mod engine; // Channel lifecycle and the stereo session
pub mod graph; // Tone source, gain stage, stereo merge
pub mod io; // Output device and stream

pub use engine::{Channel, ChannelState, EngineConfig, EngineError, StereoEngine, StereoRenderer};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Frequency range, in Hz, a control surface should keep typed values inside.
/// The engine itself passes any frequency through.
pub const FREQUENCY_RANGE: std::ops::RangeInclusive<f32> = 0.0..=25_000.0;
