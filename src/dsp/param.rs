//! Lock-free parameter cell shared between the control and audio threads.

use std::sync::atomic::{AtomicU32, Ordering};

/// An `f32` stored as its bit pattern in an `AtomicU32`.
///
/// One thread writes, the audio thread reads once per block. A load always
/// sees a whole value that was stored at some point, never a mix of two.
#[derive(Debug)]
pub struct AtomicParam(AtomicU32);

impl AtomicParam {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn stores_and_loads_exact_bits() {
        let param = AtomicParam::new(440.0);
        assert_eq!(param.load(), 440.0);

        param.store(-0.0);
        assert!(param.load().is_sign_negative());

        param.store(24_999.5);
        assert_eq!(param.load(), 24_999.5);
    }

    #[test]
    fn reader_only_sees_written_values() {
        let param = Arc::new(AtomicParam::new(1.0));
        let writer = {
            let param = Arc::clone(&param);
            thread::spawn(move || {
                for i in 0..10_000 {
                    param.store(if i % 2 == 0 { 220.0 } else { 330.0 });
                }
            })
        };

        for _ in 0..10_000 {
            let v = param.load();
            assert!(v == 1.0 || v == 220.0 || v == 330.0, "torn read: {v}");
        }
        writer.join().unwrap();
    }
}
