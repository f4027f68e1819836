//! cpal output stream carrying a [`StereoRenderer`].

use std::{
    fmt::{self, Debug},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use cpal::{
    traits::{DeviceTrait, StreamTrait},
    BufferSize, Device, FromSample, OutputCallbackInfo, Sample, SampleFormat, SizedSample,
    Stream, StreamConfig,
};
use log::{error, info, warn};

use crate::{
    engine::{config::EngineConfig, error::EngineError, stereo::StereoRenderer},
    MAX_BLOCK_SIZE,
};

/// Stream settings chosen for a device, ready to build a stream from.
#[derive(Debug, Clone)]
pub struct ResolvedOutput {
    config: StreamConfig,
    sample_format: SampleFormat,
}

impl ResolvedOutput {
    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate.0 as f32
    }

    pub fn channels(&self) -> usize {
        self.config.channels as usize
    }
}

/// A running output stream. Dropping it closes the device.
pub struct OutputStream {
    stream: Stream,
    resolved: ResolvedOutput,
}

impl Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream")
            .field("stream", &"(skipped)")
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl OutputStream {
    /// Pick a stream config for `device`: the device default, moved to the
    /// preferred sample rate when a stereo config supports it, with the
    /// preferred buffer size if one is set.
    pub fn resolve(device: &Device, config: &EngineConfig) -> Result<ResolvedOutput, EngineError> {
        let mut supported = device.default_output_config()?;

        if let Some(rate) = config.sample_rate {
            let wanted = cpal::SampleRate(rate);
            let matched = device
                .supported_output_configs()?
                .filter(|range| range.channels() >= 2)
                .find(|range| range.min_sample_rate() <= wanted && wanted <= range.max_sample_rate());
            match matched {
                Some(range) => supported = range.with_sample_rate(wanted),
                None => warn!(
                    "sample rate {rate} Hz not supported, keeping {} Hz",
                    supported.sample_rate().0
                ),
            }
        }

        let channels = supported.channels();
        if channels < 2 {
            return Err(EngineError::UnsupportedChannelCount(channels));
        }

        let sample_format = supported.sample_format();
        let mut stream_config: StreamConfig = supported.into();
        if let Some(frames) = config.buffer_size {
            stream_config.buffer_size = BufferSize::Fixed(frames);
        }

        info!("sample rate: {}", stream_config.sample_rate.0);
        info!("num channels: {}", stream_config.channels);
        info!("buffer size: {:?}", stream_config.buffer_size);
        info!("sample format: {sample_format}");

        Ok(ResolvedOutput {
            config: stream_config,
            sample_format,
        })
    }

    /// Build the stream, move `renderer` into its callback, and start it.
    ///
    /// Errors reported by the device after this point set `faulted`.
    pub fn start(
        device: &Device,
        resolved: ResolvedOutput,
        renderer: StereoRenderer,
        faulted: Arc<AtomicBool>,
    ) -> Result<Self, EngineError> {
        let stream = match resolved.sample_format {
            SampleFormat::F32 => build::<f32>(device, &resolved.config, renderer, faulted),
            SampleFormat::I16 => build::<i16>(device, &resolved.config, renderer, faulted),
            SampleFormat::U16 => build::<u16>(device, &resolved.config, renderer, faulted),
            SampleFormat::I32 => build::<i32>(device, &resolved.config, renderer, faulted),
            other => return Err(EngineError::UnsupportedSampleFormat(other)),
        }?;

        stream.play()?;
        Ok(Self { stream, resolved })
    }

    pub fn pause(&self) -> Result<(), cpal::PauseStreamError> {
        self.stream.pause()
    }
}

fn build<T>(
    device: &Device,
    config: &StreamConfig,
    mut renderer: StereoRenderer,
    faulted: Arc<AtomicBool>,
) -> Result<Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    // Buffer reused by audio callback
    let mut scratch = vec![0.0f32; MAX_BLOCK_SIZE * config.channels as usize];

    device.build_output_stream(
        config,
        move |data: &mut [T], _: &OutputCallbackInfo| {
            for chunk in data.chunks_mut(scratch.len()) {
                // Also zeroes a trailing partial frame
                let rendered = &mut scratch[..chunk.len()];
                renderer.render_interleaved(rendered);
                for (out, &sample) in chunk.iter_mut().zip(rendered.iter()) {
                    *out = T::from_sample(sample);
                }
            }
        },
        move |err| {
            error!("output stream error: {err}");
            faulted.store(true, Ordering::Release);
        },
        None,
    )
}
