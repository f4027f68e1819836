use thiserror::Error;

/// Failures while opening the output device and starting the audio session.
///
/// Every variant is fatal to engine construction. Once an engine exists its
/// control operations do not fail; a device failure during playback is
/// reported through [`StereoEngine::is_faulted`](crate::engine::StereoEngine::is_faulted)
/// instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no default output device available")]
    NoOutputDevice,
    #[error("output device '{0}' not found")]
    DeviceNotFound(String),
    #[error("failed to enumerate output devices")]
    Devices(#[from] cpal::DevicesError),
    #[error("failed to fetch default output config")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to query supported output configs")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),
    #[error("output device has {0} channel(s), a stereo output needs at least 2")]
    UnsupportedChannelCount(u16),
    #[error("unsupported sample format {0}")]
    UnsupportedSampleFormat(cpal::SampleFormat),
    #[error("failed to build output stream")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream")]
    PlayStream(#[from] cpal::PlayStreamError),
}
