//! Building blocks for one channel's signal path and the stereo merge.
//!
//! Graph nodes wrap the low-level DSP primitives with what a live channel
//! needs: a tone generator with a start/retune/release lifecycle, a standing
//! gain stage, and the merge point that interleaves both channels for the
//! device.

/// Persistent per-channel gain with click-free target changes.
pub mod gain;
/// Fixed left/right interleaving into device frames.
pub mod merge;
/// Core traits shared by all graph nodes.
pub mod node;
/// Single-tone generator with a start/retune/release lifecycle.
pub mod source;

pub use gain::{clamp_volume, GainStage};
pub use merge::StereoMerge;
pub use node::{GraphNode, RenderCtx};
pub use source::SignalSource;
