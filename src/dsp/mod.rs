//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! call from inside the device callback. They stay focused on the signal math;
//! lifecycle and routing live in `graph` and `engine`.

/// Gain and gain-ramp helpers.
pub mod amplify;
/// Phase-accumulating sine oscillator.
pub mod oscillator;
/// Atomic `f32` parameter cell for cross-thread parameter pushes.
pub mod param;

pub use oscillator::SineOscillator;
pub use param::AtomicParam;
