//! Metal device initialization

use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2_metal::{MTLCommandQueue, MTLCreateSystemDefaultDevice, MTLDevice};

use crate::error::{GpuError, Result};

// MTLCreateSystemDefaultDevice requires CoreGraphics to be linked
#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {}

/// Metal-specific GPU context wrapping device + command queue.
pub struct MetalContext {
    pub device: Retained<ProtocolObject<dyn MTLDevice>>,
    pub command_queue: Retained<ProtocolObject<dyn MTLCommandQueue>>,
}

impl MetalContext {
    /// Create a new Metal context using the system default device.
    pub fn new() -> Result<Self> {
        let device = MTLCreateSystemDefaultDevice()
            .ok_or_else(|| GpuError::DeviceUnavailable("no Metal device found".into()))?;

        let command_queue = device
            .newCommandQueue()
            .ok_or_else(|| GpuError::QueueCreation("newCommandQueue returned nil".into()))?;

        Ok(MetalContext {
            device,
            command_queue,
        })
    }

    /// Check if Metal is available on this system.
    pub fn is_available() -> bool {
        MTLCreateSystemDefaultDevice().is_some()
    }

    /// Marketing name of the underlying device.
    pub fn device_name(&self) -> String {
        self.device.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_context_creation() {
        if !MetalContext::is_available() {
            println!("Metal not available on this system, skipping");
            return;
        }

        let ctx = MetalContext::new().expect("context creation failed");
        assert!(!ctx.device_name().is_empty());
    }
}
