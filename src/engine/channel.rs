//! One channel's tone lifecycle and loudness, split across two threads.
//!
//! [`ChannelPath`] is the control half: it lives with the caller, holds the
//! authoritative frequency/volume/state, and publishes every change through a
//! shared [`ChannelControls`]. [`ChannelVoice`] is the render half: it lives
//! inside the device callback, owns the live [`SignalSource`] and the standing
//! [`GainStage`], and applies published changes at the start of each block.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use log::debug;

use crate::{
    dsp::param::AtomicParam,
    graph::{
        clamp_volume,
        merge::{LEFT_SLOT, RIGHT_SLOT},
        GainStage, GraphNode, RenderCtx, SignalSource,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Left,
    Right,
}

impl Channel {
    /// Output slot this channel is merged into (left = 0, right = 1).
    pub fn output_index(self) -> usize {
        match self {
            Channel::Left => LEFT_SLOT,
            Channel::Right => RIGHT_SLOT,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Left => f.write_str("left"),
            Channel::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Idle,
    Running,
}

const RUNNING_BIT: u64 = 1;

/// Parameters shared between a channel's control and render halves.
///
/// `lifecycle` packs the start generation and the running flag into one word
/// (`generation << 1 | running`) so the render half never observes one
/// without the other.
#[derive(Debug)]
pub struct ChannelControls {
    frequency: AtomicParam,
    gain: AtomicParam,
    lifecycle: AtomicU64,
}

impl ChannelControls {
    fn new(frequency: f32, gain: f32) -> Self {
        Self {
            frequency: AtomicParam::new(frequency),
            gain: AtomicParam::new(gain),
            lifecycle: AtomicU64::new(0),
        }
    }

    fn publish_lifecycle(&self, generation: u64, running: bool) {
        let word = (generation << 1) | if running { RUNNING_BIT } else { 0 };
        self.lifecycle.store(word, Ordering::Release);
    }

    fn lifecycle(&self) -> (u64, bool) {
        let word = self.lifecycle.load(Ordering::Acquire);
        (word >> 1, word & RUNNING_BIT != 0)
    }
}

/// Control half of a channel.
///
/// State machine: `Idle --start--> Running`, `Running --start--> Running`
/// (restart: the previous source is torn down first), `Running --stop-->
/// Idle`, `Idle --stop--> Idle` (no-op).
#[derive(Debug)]
pub struct ChannelPath {
    channel: Channel,
    frequency: f32,
    volume: f32,
    state: ChannelState,
    generation: u64,
    controls: Arc<ChannelControls>,
}

impl ChannelPath {
    /// Create a connected control/render pair for `channel`.
    pub fn new(channel: Channel, frequency: f32, volume: f32) -> (Self, ChannelVoice) {
        let volume = clamp_volume(volume);
        let controls = Arc::new(ChannelControls::new(frequency, volume));

        let path = Self {
            channel,
            frequency,
            volume,
            state: ChannelState::Idle,
            generation: 0,
            controls: Arc::clone(&controls),
        };
        let voice = ChannelVoice {
            channel,
            controls,
            source: None,
            gain: GainStage::new(volume),
            seen_generation: 0,
        };
        (path, voice)
    }

    /// Start a fresh tone at the stored frequency. Restarts if already running.
    pub fn start(&mut self) {
        if self.state == ChannelState::Running {
            self.stop();
        }

        self.generation += 1;
        self.controls.frequency.store(self.frequency);
        self.controls.publish_lifecycle(self.generation, true);
        self.state = ChannelState::Running;
        debug!(
            "{} channel started at {} Hz (start #{})",
            self.channel, self.frequency, self.generation
        );
    }

    /// Silence the channel. The gain stage stays configured.
    pub fn stop(&mut self) {
        if self.state == ChannelState::Idle {
            return;
        }

        self.controls.publish_lifecycle(self.generation, false);
        self.state = ChannelState::Idle;
        debug!("{} channel stopped", self.channel);
    }

    /// Store `frequency` for the next start and retune the live tone if running.
    ///
    /// The value is not range-checked.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.controls.frequency.store(frequency);
    }

    /// Set the gain stage, clamped to `[0, 1]`, whether or not a tone is playing.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        self.controls.gain.store(self.volume);
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ChannelState::Running
    }

    /// Stored frequency, authoritative for the next start.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Frequency currently sounding, if the channel is running.
    pub fn effective_frequency(&self) -> Option<f32> {
        self.is_running().then_some(self.frequency)
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Number of times this channel has been started.
    pub fn starts(&self) -> u64 {
        self.generation
    }
}

/// Render half of a channel, owned by the audio thread.
///
/// Holds at most one [`SignalSource`]. Published changes are applied at the
/// start of the next block: a new start generation replaces the source, a
/// cleared running flag releases it, and a changed frequency retunes it.
#[derive(Debug)]
pub struct ChannelVoice {
    channel: Channel,
    controls: Arc<ChannelControls>,
    source: Option<SignalSource>,
    gain: GainStage,
    seen_generation: u64,
}

impl ChannelVoice {
    fn sync(&mut self) {
        let (generation, running) = self.controls.lifecycle();
        let frequency = self.controls.frequency.load();

        if !running {
            if let Some(source) = self.source.take() {
                source.end_emitting();
            }
        } else if generation != self.seen_generation {
            if let Some(previous) = self.source.take() {
                previous.end_emitting();
            }
            let mut source = SignalSource::create(frequency);
            source.begin_emitting();
            self.source = Some(source);
            self.seen_generation = generation;
        } else if let Some(source) = self.source.as_mut() {
            if source.frequency() != frequency {
                source.retune(frequency);
            }
        }

        self.gain.set_target(self.controls.gain.load());
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Number of tone generators alive in this channel (0 or 1).
    pub fn live_sources(&self) -> usize {
        usize::from(self.source.is_some())
    }

    /// Frequency of the live generator, if any.
    pub fn source_frequency(&self) -> Option<f32> {
        self.source.as_ref().map(SignalSource::frequency)
    }

    pub fn gain(&self) -> &GainStage {
        &self.gain
    }
}

impl GraphNode for ChannelVoice {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.sync();

        match self.source.as_mut() {
            Some(source) => source.render_block(out, ctx),
            None => out.fill(0.0),
        }
        self.gain.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_some()
    }
}
