// Purpose: channel lifecycle, stereo composition, session setup
// This layer sits above graph nodes and is what a control surface talks to

pub mod channel;
pub mod config;
pub mod error;
pub mod stereo;

pub use channel::{Channel, ChannelPath, ChannelState, ChannelVoice};
pub use config::EngineConfig;
pub use error::EngineError;
pub use stereo::{StereoEngine, StereoRenderer};
