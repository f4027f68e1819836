//! The merge point: two planar channel blocks into one interleaved stream.

/*
Interleaving
============

Devices take audio as interleaved frames: one sample per output channel,
channel after channel, frame after frame.

    left:   [L0, L1, L2, ...]
    right:  [R0, R1, R2, ...]

    2-channel device:  [L0, R0, L1, R1, L2, R2, ...]
    4-channel device:  [L0, R0, 0, 0, L1, R1, 0, 0, ...]

The left channel always lands in output slot 0 and the right channel in
slot 1. Slots beyond the first two are written as silence. The assignment is
a property of the merge itself and never changes after construction.

A 1-channel frame has nowhere to put two channels, so it receives the
average of both (only reachable through offline rendering; the device path
refuses mono outputs).
*/

/// Output slot the left channel is written to.
pub const LEFT_SLOT: usize = 0;
/// Output slot the right channel is written to.
pub const RIGHT_SLOT: usize = 1;

#[derive(Debug, Clone, Copy)]
pub struct StereoMerge {
    channels: usize,
}

impl StereoMerge {
    pub fn new(channels: usize) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Write `left.len()` frames into `out`.
    ///
    /// `out` must hold at least `left.len() * channels` samples.
    #[inline]
    pub fn merge(&self, left: &[f32], right: &[f32], out: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        debug_assert!(out.len() >= left.len() * self.channels);

        if self.channels == 0 {
            return;
        }

        if self.channels == 1 {
            for ((o, &l), &r) in out.iter_mut().zip(left).zip(right) {
                *o = (l + r) * 0.5;
            }
            return;
        }

        for ((frame, &l), &r) in out.chunks_exact_mut(self.channels).zip(left).zip(right) {
            frame[LEFT_SLOT] = l;
            frame[RIGHT_SLOT] = r;
            frame[2..].fill(0.0);
        }
    }
}
