//! Metal buffer operations - GPU memory allocation and data transfer

use std::ptr::NonNull;

use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2_metal::{MTLBuffer, MTLDevice, MTLResourceOptions};

use super::device_init::MetalContext;
use crate::error::{GpuError, Result};

/// Metal-specific GPU buffer in shared storage mode.
pub struct MetalBuffer {
    pub(crate) mtl_buffer: Retained<ProtocolObject<dyn MTLBuffer>>,
    pub(crate) byte_size: usize,
}

impl MetalBuffer {
    /// Create a buffer holding a copy of `data`.
    pub fn from_f32s(ctx: &MetalContext, data: &[f32]) -> Result<Self> {
        let byte_size = std::mem::size_of_val(data);
        if byte_size == 0 {
            return Err(GpuError::Allocation("empty input slice".into()));
        }

        let ptr = NonNull::new(data.as_ptr() as *mut std::ffi::c_void)
            .ok_or_else(|| GpuError::Allocation("null input pointer".into()))?;
        let mtl_buffer = unsafe {
            ctx.device.newBufferWithBytes_length_options(
                ptr,
                byte_size,
                MTLResourceOptions::StorageModeShared,
            )
        }
        .ok_or_else(|| {
            GpuError::Allocation(format!("{} bytes (shared, initialized)", byte_size))
        })?;

        Ok(MetalBuffer {
            mtl_buffer,
            byte_size,
        })
    }

    /// Allocate an uninitialized buffer of `byte_size` bytes.
    pub fn allocate(ctx: &MetalContext, byte_size: usize) -> Result<Self> {
        if byte_size == 0 {
            return Err(GpuError::Allocation("zero-byte buffer".into()));
        }

        let mtl_buffer = ctx
            .device
            .newBufferWithLength_options(byte_size, MTLResourceOptions::StorageModeShared)
            .ok_or_else(|| GpuError::Allocation(format!("{} bytes (shared)", byte_size)))?;

        Ok(MetalBuffer {
            mtl_buffer,
            byte_size,
        })
    }

    /// Copy the first `len` f32 elements back to host memory.
    ///
    /// Shared storage makes the contents CPU-visible once the command
    /// buffer has completed; no staging pass is needed.
    pub fn read_f32s(&self, len: usize) -> Vec<f32> {
        let len = len.min(self.byte_size / std::mem::size_of::<f32>());
        let mut out = vec![0.0f32; len];
        let src = self.mtl_buffer.contents().as_ptr() as *const f32;
        unsafe {
            std::ptr::copy_nonoverlapping(src, out.as_mut_ptr(), len);
        }
        out
    }

    /// Byte size of the buffer.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }
}
