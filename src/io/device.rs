//! Output device enumeration and lookup

use cpal::traits::{DeviceTrait, HostTrait};
use log::info;

use crate::engine::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// List the output devices of the default host
pub fn list_output_devices() -> Result<Vec<OutputDeviceInfo>, EngineError> {
    let host = cpal::default_host();
    let default_name = host.default_output_device().and_then(|d| d.name().ok());

    let mut result = Vec::new();
    for device in host.output_devices()? {
        if let Ok(name) = device.name() {
            result.push(OutputDeviceInfo {
                is_default: Some(&name) == default_name.as_ref(),
                name,
            });
        }
    }

    Ok(result)
}

/// Get output device by name, or the default one if name is None
pub fn find_output_device(name: Option<&str>) -> Result<cpal::Device, EngineError> {
    let host = cpal::default_host();
    info!("cpal host: {}", host.id().name());

    let device = match name {
        Some(wanted) => host
            .output_devices()?
            .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
            .ok_or_else(|| EngineError::DeviceNotFound(wanted.to_string()))?,
        None => host
            .default_output_device()
            .ok_or(EngineError::NoOutputDevice)?,
    };

    match device.name() {
        Ok(name) => info!("cpal device: {name}"),
        Err(_) => info!("cpal device: (no name)"),
    }
    Ok(device)
}
