/// Context passed to graph nodes during rendering
///
/// Contains information about what to render:
/// - sample_rate: Audio sample rate of the output stream (e.g., 48000.0)
/// - frame: Index of the first frame of this block since the session started
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frame: u64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frame: 0,
        }
    }

    /// Context for the block that follows one of `frames` frames.
    pub fn advanced(&self, frames: usize) -> Self {
        Self {
            frame: self.frame + frames as u64,
            ..*self
        }
    }
}

/// Core trait for audio processing graph nodes
///
/// Nodes render one block at a time into a caller-provided buffer. Nodes that
/// generate sound overwrite `out`; nodes that process sound (gain) transform
/// it in place.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Check if this node is currently producing sound
    fn is_active(&self) -> bool {
        true
    }
}
