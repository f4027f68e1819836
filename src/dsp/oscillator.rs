//! Phase-accumulating sine oscillator.

use std::f64::consts::TAU;

/*
Phase Accumulator
=================

The oscillator keeps a single number between calls: its phase, measured in
cycles (0.0 = start of a cycle, 0.5 = halfway, wraps back to 0.0 at 1.0).
Every sample the phase advances by

    increment = frequency / sample_rate

and the output is sin(2π × phase).

Example: 440 Hz at 48 kHz
  - increment = 440 / 48000 ≈ 0.009167 cycles per sample
  - one full cycle takes 48000 / 440 ≈ 109.1 samples

Why keep phase instead of computing sin(2π f t)?
------------------------------------------------

Because frequency can change while the tone is sounding. If the output were
computed from absolute time, a frequency step from f1 to f2 at time t would
jump the waveform from sin(2π f1 t) to sin(2π f2 t) - two unrelated values,
which is heard as a click.

With an accumulator only the *rate* of phase changes. The waveform continues
from wherever it was, and the step is heard as a pitch change and nothing
else:

    f = 440 Hz          f = 880 Hz
    ╭─╮   ╭─╮   ╭─╮  ╭╮╭╮╭╮╭╮
    │ │   │ │   │ │  ││││││││
      ╰─╯   ╰─╯   ╰──╯╰╯╰╯╰╯╰
                     ↑ retune: amplitude and phase continue

Precision
---------

The phase is an f64. An f32 phase loses low bits after long runs, which shows
up as slow pitch drift on sustained tones. The output sample itself is f32.

Negative frequencies run the phase backward. `rem_euclid` alone can round a
tiny negative step up to exactly 1.0, so the wrap folds that case back to 0.
*/

#[derive(Debug, Clone, Default)]
pub struct SineOscillator {
    phase: f64,
}

impl SineOscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase in cycles, always in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Fill `out` with the next `out.len()` samples at `frequency` Hz.
    ///
    /// The first sample of a freshly created oscillator is `sin(0) = 0`.
    #[inline]
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        let increment = frequency as f64 / sample_rate as f64;

        for sample in out.iter_mut() {
            *sample = (TAU * self.phase).sin() as f32;
            self.phase = wrap_phase(self.phase + increment);
        }
    }
}

#[inline]
fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(1.0);
    if wrapped >= 1.0 {
        wrapped - 1.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_closed_form_sine() {
        let sample_rate = 48_000.0;
        let frequency = 440.0;
        let mut osc = SineOscillator::new();

        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer, frequency, sample_rate);

        // sample n should be sin(2pi f n / sr)
        for n in [0usize, 1, 12, 100] {
            let expected =
                (std::f32::consts::TAU * frequency * n as f32 / sample_rate).sin();
            let actual = buffer[n];
            assert!(
                (actual - expected).abs() < 1e-4,
                "sample {n}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn phase_continues_across_blocks() {
        let mut split = SineOscillator::new();
        let mut whole = SineOscillator::new();

        let mut a = vec![0.0f32; 64];
        let mut b = vec![0.0f32; 64];
        let mut joined = vec![0.0f32; 128];

        split.render(&mut a, 330.0, 48_000.0);
        split.render(&mut b, 330.0, 48_000.0);
        whole.render(&mut joined, 330.0, 48_000.0);

        for (i, (&x, &y)) in a.iter().chain(b.iter()).zip(joined.iter()).enumerate() {
            assert!((x - y).abs() < 1e-6, "sample {i} diverged: {x} vs {y}");
        }
    }

    #[test]
    fn frequency_step_keeps_waveform_continuous() {
        let sample_rate = 48_000.0;
        let mut osc = SineOscillator::new();
        let mut before = vec![0.0f32; 100];
        let mut after = vec![0.0f32; 100];

        osc.render(&mut before, 440.0, sample_rate);
        osc.render(&mut after, 880.0, sample_rate);

        // Largest per-sample change at 880 Hz is 2π·880/48000 ≈ 0.115.
        let max_step = 2.0 * std::f32::consts::PI * 880.0 / sample_rate;
        let jump = (after[0] - before[99]).abs();
        assert!(jump <= max_step + 1e-4, "discontinuity at retune: {jump}");
    }

    #[test]
    fn phase_stays_wrapped() {
        let mut osc = SineOscillator::new();
        let mut buffer = vec![0.0f32; 4096];

        osc.render(&mut buffer, 25_000.0, 48_000.0);
        assert!((0.0..1.0).contains(&osc.phase()));

        osc.render(&mut buffer, -440.0, 48_000.0);
        assert!((0.0..1.0).contains(&osc.phase()));
        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn tiny_backward_step_wraps_below_one() {
        // 0.0 - 2e-17 rounds to exactly 1.0 under rem_euclid
        assert_eq!((-2e-17f64).rem_euclid(1.0), 1.0);
        assert_eq!(wrap_phase(-2e-17), 0.0);

        let mut osc = SineOscillator::new();
        let mut buffer = vec![0.0f32; 8];
        osc.render(&mut buffer, -1e-12, 48_000.0);
        assert!((0.0..1.0).contains(&osc.phase()), "phase {}", osc.phase());
    }

    #[test]
    fn zero_frequency_is_silent() {
        let mut osc = SineOscillator::new();
        let mut buffer = vec![1.0f32; 256];
        osc.render(&mut buffer, 0.0, 48_000.0);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
