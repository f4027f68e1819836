use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{info, warn};

use crate::{
    engine::{
        channel::{Channel, ChannelPath, ChannelVoice},
        config::EngineConfig,
        error::EngineError,
    },
    graph::{clamp_volume, GraphNode, RenderCtx, StereoMerge},
    io::{device::find_output_device, output::OutputStream},
    MAX_BLOCK_SIZE,
};

/*
Stereo Engine
=============

The engine is two independent channels feeding one stereo output:

    ChannelPath(left)  ─┐                           ┌─ slot 0 ─┐
                        ├─ control thread │ audio ─ ┤          ├─ device
    ChannelPath(right) ─┘                           └─ slot 1 ─┘

It is split along the thread boundary:

  StereoEngine     Control side. Owned by the caller. Every control call
                   updates the channel's stored state and publishes it to
                   atomics; nothing here blocks or allocates.

  StereoRenderer   Audio side. Moved into the device callback (or kept by an
                   offline host). Each block it picks up published changes,
                   renders both channels, and merges them into the fixed
                   left=0 / right=1 slots.

All control calls are expected from one thread. The engine holds no locks;
`&mut self` on every mutating call is the serialization.

Example usage:
  let mut engine = StereoEngine::open(&EngineConfig::default())?;
  engine.set_left_frequency(220.0);
  engine.set_right_frequency(330.0);
  engine.start_both();
  ...
  engine.end_session();
*/

/// Control side of a stereo tone session.
pub struct StereoEngine {
    left: ChannelPath,
    right: ChannelPath,
    volume: f32,
    sample_rate: f32,
    stream: Option<OutputStream>,
    faulted: Arc<AtomicBool>,
}

impl StereoEngine {
    /// Open the configured output device and start rendering into it.
    ///
    /// Both channels start idle at `config.default_frequency` with the shared
    /// `config.default_volume`.
    pub fn open(config: &EngineConfig) -> Result<Self, EngineError> {
        let device = find_output_device(config.output_device.as_deref())?;
        let resolved = OutputStream::resolve(&device, config)?;

        let (mut engine, renderer) =
            Self::build(config, resolved.sample_rate(), resolved.channels());

        let stream = OutputStream::start(&device, resolved, renderer, Arc::clone(&engine.faulted))?;
        engine.stream = Some(stream);

        info!(
            "stereo session open at {} Hz, volume {}",
            engine.sample_rate, engine.volume
        );
        Ok(engine)
    }

    /// Create an engine without a device. The caller drives the returned
    /// renderer itself (tests, benchmarks, offline bounces).
    pub fn offline(config: &EngineConfig, sample_rate: f32) -> (Self, StereoRenderer) {
        Self::build(config, sample_rate, 2)
    }

    fn build(config: &EngineConfig, sample_rate: f32, channels: usize) -> (Self, StereoRenderer) {
        let volume = clamp_volume(config.default_volume);
        let (left, left_voice) = ChannelPath::new(Channel::Left, config.default_frequency, volume);
        let (right, right_voice) =
            ChannelPath::new(Channel::Right, config.default_frequency, volume);

        let engine = Self {
            left,
            right,
            volume,
            sample_rate,
            stream: None,
            faulted: Arc::new(AtomicBool::new(false)),
        };
        let renderer =
            StereoRenderer::new(left_voice, right_voice, StereoMerge::new(channels), sample_rate);
        (engine, renderer)
    }

    fn path_mut(&mut self, channel: Channel) -> &mut ChannelPath {
        match channel {
            Channel::Left => &mut self.left,
            Channel::Right => &mut self.right,
        }
    }

    pub fn start(&mut self, channel: Channel) {
        self.path_mut(channel).start();
    }

    pub fn stop(&mut self, channel: Channel) {
        self.path_mut(channel).stop();
    }

    /// Not range-checked; see [`ChannelPath::set_frequency`].
    pub fn set_frequency(&mut self, channel: Channel, frequency: f32) {
        self.path_mut(channel).set_frequency(frequency);
    }

    pub fn start_left(&mut self) {
        self.start(Channel::Left);
    }

    pub fn start_right(&mut self) {
        self.start(Channel::Right);
    }

    /// Start left, then right. Running channels restart.
    pub fn start_both(&mut self) {
        self.start_left();
        self.start_right();
    }

    pub fn stop_left(&mut self) {
        self.stop(Channel::Left);
    }

    pub fn stop_right(&mut self) {
        self.stop(Channel::Right);
    }

    /// Stop left, then right.
    pub fn stop_both(&mut self) {
        self.stop_left();
        self.stop_right();
    }

    pub fn set_left_frequency(&mut self, frequency: f32) {
        self.set_frequency(Channel::Left, frequency);
    }

    pub fn set_right_frequency(&mut self, frequency: f32) {
        self.set_frequency(Channel::Right, frequency);
    }

    /// Apply one volume, clamped to `[0, 1]`, to both channels.
    pub fn set_volumes(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        self.left.set_volume(self.volume);
        self.right.set_volume(self.volume);
    }

    pub fn left(&self) -> &ChannelPath {
        &self.left
    }

    pub fn right(&self) -> &ChannelPath {
        &self.right
    }

    pub fn channel(&self, channel: Channel) -> &ChannelPath {
        match channel {
            Channel::Left => &self.left,
            Channel::Right => &self.right,
        }
    }

    /// Shared volume of both channels.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Whether the device stream has reported an error. A faulted engine
    /// stays silent and must be replaced by a newly opened one.
    pub fn is_faulted(&self) -> bool {
        self.faulted.load(Ordering::Acquire)
    }

    /// End the session: stop both channels, then stop and release the device.
    pub fn end_session(mut self) {
        self.stop_both();

        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                warn!("failed to pause output stream: {err}");
            }
        }
        info!(
            "stereo session ended after {} left / {} right starts",
            self.left.starts(),
            self.right.starts()
        );
    }
}

/// Audio side of a stereo tone session.
pub struct StereoRenderer {
    left: ChannelVoice,
    right: ChannelVoice,
    merge: StereoMerge,
    ctx: RenderCtx,
    left_buf: Vec<f32>,
    right_buf: Vec<f32>,
}

impl StereoRenderer {
    fn new(left: ChannelVoice, right: ChannelVoice, merge: StereoMerge, sample_rate: f32) -> Self {
        Self {
            left,
            right,
            merge,
            ctx: RenderCtx::new(sample_rate),
            left_buf: vec![0.0; MAX_BLOCK_SIZE],
            right_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Fill an interleaved device buffer. `data.len()` should be a multiple of
    /// [`channels`](Self::channels); a trailing partial frame is filled with
    /// silence.
    pub fn render_interleaved(&mut self, data: &mut [f32]) {
        let channels = self.merge.channels();
        if channels == 0 {
            return;
        }

        let total_frames = data.len() / channels;
        let mut frames_written = 0;
        while frames_written < total_frames {
            let frames_remaining = total_frames - frames_written;
            let frames_to_render = frames_remaining.min(MAX_BLOCK_SIZE);

            let left = &mut self.left_buf[..frames_to_render];
            let right = &mut self.right_buf[..frames_to_render];
            Self::render_pair(&mut self.left, &mut self.right, left, right, &mut self.ctx);

            let out_off = frames_written * channels;
            let out_end = out_off + frames_to_render * channels;
            self.merge.merge(left, right, &mut data[out_off..out_end]);

            frames_written += frames_to_render;
        }

        data[total_frames * channels..].fill(0.0);
    }

    /// Render planar blocks for each channel. Both slices must have the same
    /// length.
    pub fn render_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        for (l, r) in left
            .chunks_mut(MAX_BLOCK_SIZE)
            .zip(right.chunks_mut(MAX_BLOCK_SIZE))
        {
            Self::render_pair(&mut self.left, &mut self.right, l, r, &mut self.ctx);
        }
    }

    fn render_pair(
        left_voice: &mut ChannelVoice,
        right_voice: &mut ChannelVoice,
        left: &mut [f32],
        right: &mut [f32],
        ctx: &mut RenderCtx,
    ) {
        left_voice.render_block(left, ctx);
        right_voice.render_block(right, ctx);
        *ctx = ctx.advanced(left.len());
    }

    pub fn left(&self) -> &ChannelVoice {
        &self.left
    }

    pub fn right(&self) -> &ChannelVoice {
        &self.right
    }

    pub fn channel(&self, channel: Channel) -> &ChannelVoice {
        match channel {
            Channel::Left => &self.left,
            Channel::Right => &self.right,
        }
    }

    /// Interleaved channel count of the output this renderer feeds.
    pub fn channels(&self) -> usize {
        self.merge.channels()
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }

    /// Frames rendered since the session started.
    pub fn frames_rendered(&self) -> u64 {
        self.ctx.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsp::amplify::peak, engine::channel::ChannelState};

    fn offline() -> (StereoEngine, StereoRenderer) {
        StereoEngine::offline(&EngineConfig::default(), 48_000.0)
    }

    fn offline_full_volume() -> (StereoEngine, StereoRenderer) {
        StereoEngine::offline(&EngineConfig::default().default_volume(1.0), 48_000.0)
    }

    #[test]
    fn channels_start_idle_with_shared_volume() {
        let (engine, renderer) = offline();
        assert_eq!(engine.left().state(), ChannelState::Idle);
        assert_eq!(engine.right().state(), ChannelState::Idle);
        assert_eq!(engine.left().volume(), 0.5);
        assert_eq!(engine.right().volume(), 0.5);
        assert_eq!(renderer.channels(), 2);
        assert!(!engine.is_faulted());
    }

    #[test]
    fn left_tone_lands_in_slot_zero_only() {
        let (mut engine, mut renderer) = offline_full_volume();
        engine.start_left();

        let mut data = vec![0.0f32; 2 * 512];
        renderer.render_interleaved(&mut data);

        let left: Vec<f32> = data.iter().step_by(2).copied().collect();
        let right: Vec<f32> = data.iter().skip(1).step_by(2).copied().collect();
        assert!(peak(&left) > 0.9);
        assert!(right.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn interleaved_render_spans_multiple_blocks() {
        let (mut engine, mut renderer) = offline();
        engine.start_both();

        let frames = MAX_BLOCK_SIZE * 2 + 17;
        let mut data = vec![0.0f32; frames * 2];
        renderer.render_interleaved(&mut data);

        assert_eq!(renderer.frames_rendered(), frames as u64);
        assert!(data.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn trailing_partial_frame_is_silent() {
        let (mut engine, mut renderer) = offline_full_volume();
        engine.start_both();

        // Stale contents from a previous callback must not leak through
        let mut data = vec![0.75f32; 2 * 64 + 1];
        renderer.render_interleaved(&mut data);

        assert_eq!(renderer.frames_rendered(), 64);
        assert_eq!(data[2 * 64], 0.0);
        assert!(peak(&data[..2 * 64]) > 0.9);
    }

    #[test]
    fn end_session_without_device() {
        let (mut engine, _renderer) = offline();
        engine.start_both();
        engine.end_session();
    }
}
