// Purpose - the audio device boundary: enumeration and the output stream

pub mod device;
pub mod output;

pub use device::{find_output_device, list_output_devices, OutputDeviceInfo};
pub use output::{OutputStream, ResolvedOutput};
