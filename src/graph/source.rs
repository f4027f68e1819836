use crate::{
    dsp::oscillator::SineOscillator,
    graph::node::{GraphNode, RenderCtx},
};

/*
Signal Source
=============

A SignalSource is one channel's tone generator for the span of a single
start/stop cycle. It is created when the channel starts, retuned while it
sounds, and released when the channel stops or restarts.

Lifecycle
---------

    create(f) ──→ begin_emitting() ──→ retune(f') ... ──→ end_emitting()
      (silent)        (sounding)                         (consumed)

  - A created source renders silence until `begin_emitting`, so it can be
    wired up before it becomes audible.
  - `retune` only changes the phase increment. The waveform continues from
    its current phase, so the only audible effect is the pitch step.
  - `end_emitting` takes `self` by value. A released source no longer exists
    and cannot be retuned; the compiler enforces what would otherwise be a
    runtime check.

Frequency Policy
----------------

No range check happens here. Frequencies above Nyquist alias and negative
frequencies run the phase backward; keeping typed values inside the
[0, 25000] Hz contract is the control surface's responsibility.

Example usage:
  let mut source = SignalSource::create(440.0);
  source.begin_emitting();
  source.render_block(&mut buffer, &ctx);   // 440 Hz
  source.retune(880.0);
  source.render_block(&mut buffer, &ctx);   // 880 Hz, phase-continuous
  source.end_emitting();
*/

#[derive(Debug)]
pub struct SignalSource {
    osc: SineOscillator,
    frequency: f32,
    emitting: bool,
}

impl SignalSource {
    /// Construct a generator at `frequency` Hz, starting at phase zero on the
    /// next rendered block.
    pub fn create(frequency: f32) -> Self {
        Self {
            osc: SineOscillator::new(),
            frequency,
            emitting: false,
        }
    }

    /// Change frequency from the next rendered block on.
    pub fn retune(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    pub fn begin_emitting(&mut self) {
        self.emitting = true;
    }

    /// Deactivate and release the generator. Consumes the source.
    pub fn end_emitting(self) {}

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }
}

impl GraphNode for SignalSource {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if !self.emitting {
            out.fill(0.0);
            return;
        }
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }

    fn is_active(&self) -> bool {
        self.emitting
    }
}
