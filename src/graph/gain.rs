use crate::{
    dsp::amplify::apply_gain_ramp,
    graph::node::{GraphNode, RenderCtx},
};

/// Clamp a volume to `[0, 1]`. NaN is treated as silence.
#[inline]
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Persistent per-channel volume stage.
///
/// Unlike the tone generator, a gain stage is created once with its channel
/// and survives every start/stop cycle, so a volume set while idle is already
/// in place when the next tone starts. A new target is reached by a linear
/// ramp over one block (see `dsp::amplify`).
#[derive(Debug, Clone)]
pub struct GainStage {
    applied: f32,
    target: f32,
}

impl GainStage {
    pub fn new(volume: f32) -> Self {
        let volume = clamp_volume(volume);
        Self {
            applied: volume,
            target: volume,
        }
    }

    pub fn set_target(&mut self, volume: f32) {
        self.target = clamp_volume(volume);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Gain reached at the end of the last rendered block.
    pub fn applied(&self) -> f32 {
        self.applied
    }
}

impl GraphNode for GainStage {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        apply_gain_ramp(out, self.applied, self.target);
        self.applied = self.target;
    }
}
