//! Compute device and parameter dtype descriptors.
//!
//! Provides:
//! - [`Device`]: where the model runs (`cpu`, `cuda`, `metal`)
//! - [`DType`]: parameter precision reported alongside the model name
//!
//! Both parse from and display as the lowercase names used on the command line
//! and in API responses.

use std::fmt;
use std::str::FromStr;

/// Compute device for inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
    Metal,
}

impl Device {
    /// All known devices.
    pub fn all() -> &'static [Device] {
        &[Device::Cpu, Device::Cuda, Device::Metal]
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda => write!(f, "cuda"),
            Device::Metal => write!(f, "metal"),
        }
    }
}

impl FromStr for Device {
    type Err = DeviceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" | "gpu" => Ok(Device::Cuda),
            "metal" | "mps" => Ok(Device::Metal),
            _ => Err(DeviceParseError::UnknownDevice(s.to_string())),
        }
    }
}

/// Parameter precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    #[default]
    Float32,
    Float16,
    BFloat16,
}

impl DType {
    /// Size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::Float32 => 4,
            DType::Float16 | DType::BFloat16 => 2,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Float32 => write!(f, "float32"),
            DType::Float16 => write!(f, "float16"),
            DType::BFloat16 => write!(f, "bfloat16"),
        }
    }
}

impl FromStr for DType {
    type Err = DeviceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float32" | "f32" | "fp32" => Ok(DType::Float32),
            "float16" | "f16" | "fp16" | "half" => Ok(DType::Float16),
            "bfloat16" | "bf16" => Ok(DType::BFloat16),
            _ => Err(DeviceParseError::UnknownDType(s.to_string())),
        }
    }
}

/// Errors from parsing device or dtype names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceParseError {
    #[error("unknown device `{0}` (expected cpu, cuda or metal)")]
    UnknownDevice(String),
    #[error("unknown dtype `{0}` (expected float32, float16 or bfloat16)")]
    UnknownDType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_display_parse_roundtrip() {
        for &device in Device::all() {
            assert_eq!(device.to_string().parse::<Device>().unwrap(), device);
        }
    }

    #[test]
    fn device_aliases() {
        assert_eq!("MPS".parse::<Device>().unwrap(), Device::Metal);
        assert_eq!("gpu".parse::<Device>().unwrap(), Device::Cuda);
    }

    #[test]
    fn unknown_device_errors() {
        let err = "tpu".parse::<Device>().unwrap_err();
        assert_eq!(err, DeviceParseError::UnknownDevice("tpu".to_string()));
        assert!(err.to_string().contains("tpu"));
    }

    #[test]
    fn dtype_parse_and_size() {
        assert_eq!("bf16".parse::<DType>().unwrap(), DType::BFloat16);
        assert_eq!(DType::Float16.size_bytes(), 2);
        assert_eq!(DType::default().to_string(), "float32");
        assert!("int4".parse::<DType>().is_err());
    }
}
