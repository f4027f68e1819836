//! Gain primitives.

/*
Gain and Ramps
==============

Vocabulary
----------

  amplitude     The "height" of a signal, in [-1.0, +1.0] for audio here.

  gain          A multiplier applied to amplitude.
                  gain = 1.0  →  unchanged (unity gain)
                  gain = 0.5  →  half amplitude (about -6 dB)
                  gain = 0.0  →  silence

  zipper noise  The buzzing/clicking heard when a gain jumps from one value
                to another between two samples. A slider dragged quickly
                produces a burst of these steps.


Stepped vs Ramped Gain
----------------------

Applying a new gain at a block boundary means every sample after the
boundary is scaled differently from the one before it:

    gain:    0.8 0.8 0.8 0.8 │ 0.2 0.2 0.2 0.2
    signal:  ╭──────╮        │
             │      ╰────────┼──╮  ← amplitude drops in a single sample
                             │  ╰──

On a loud tone that single-sample drop is an audible click. Ramping spreads
the change across the block so the envelope of the signal is a straight line
instead of a cliff:

    gain:    0.80 0.65 0.50 0.35 0.20 0.20 ...

The ramp runs from the previously applied gain to the new target over one
render block (a few milliseconds at typical block sizes), then holds.


The Math
--------

For a block of N samples ramping from g0 to g1:

    output[i] = signal[i] × (g0 + (g1 - g0) × (i + 1) / N)

The last sample of the block lands exactly on g1, so the next block can apply
a constant g1 with no seam.
*/

/// Multiply a signal by a constant gain factor (in-place).
///
/// # Arguments
/// * `signal` - The signal buffer to modify in-place
/// * `gain` - The gain factor (0.0 = silence, 1.0 = unchanged)
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Multiply a signal by a gain that moves linearly from `from` to `to`
/// across the buffer (in-place). The final sample is scaled by exactly `to`.
///
/// Falls back to [`apply_gain`] when the two gains are equal.
#[inline]
pub fn apply_gain_ramp(signal: &mut [f32], from: f32, to: f32) {
    if from == to {
        apply_gain(signal, to);
        return;
    }

    let len = signal.len() as f32;
    let delta = to - from;
    for (i, sample) in signal.iter_mut().enumerate() {
        let gain = from + delta * (i as f32 + 1.0) / len;
        *sample *= gain;
    }
}

/// Largest absolute sample value in the buffer.
#[inline]
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
