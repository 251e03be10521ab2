//! Backend abstraction - thin enum dispatch over Metal and wgpu.
//!
//! `GpuContext`, `GpuBuffer`, and `CompiledKernel` wrap the backend-specific
//! types behind feature gates. Each enum carries an `Unavailable` variant so
//! the crate still compiles with no backend feature enabled; when only one
//! backend is compiled in, the other arms simply do not exist.

use crate::error::{GpuError, Result};
use crate::kernel::KernelSource;

#[cfg(feature = "metal-backend")]
use crate::metal::{
    buffer_ops::MetalBuffer, compile::compile_msl, compile::MetalCompiledKernel,
    device_init::MetalContext, dispatch::dispatch as metal_dispatch,
};

#[cfg(feature = "webgpu-backend")]
use crate::wgpu_backend::{
    buffer_ops::WgpuBuffer, compile::compile_wgsl, compile::WgpuCompiledKernel,
    device_init::WgpuContext, dispatch::dispatch as wgpu_dispatch,
};

fn no_backend<T>() -> Result<T> {
    Err(GpuError::DeviceUnavailable(
        "no GPU backend enabled at build time".into(),
    ))
}

/// One acquired compute device plus its command queue.
pub enum GpuContext {
    #[cfg(feature = "metal-backend")]
    Metal(MetalContext),
    #[cfg(feature = "webgpu-backend")]
    Wgpu(WgpuContext),
    /// Placeholder when no backend feature is enabled - never constructed
    /// at runtime.
    #[allow(dead_code)]
    Unavailable,
}

/// A compiled compute kernel ready for dispatch.
pub enum CompiledKernel {
    #[cfg(feature = "metal-backend")]
    Metal(MetalCompiledKernel),
    #[cfg(feature = "webgpu-backend")]
    Wgpu(WgpuCompiledKernel),
    #[allow(dead_code)]
    Unavailable,
}

/// A device buffer owned by one of the backends.
pub enum GpuBuffer {
    #[cfg(feature = "metal-backend")]
    Metal(MetalBuffer),
    #[cfg(feature = "webgpu-backend")]
    Wgpu(WgpuBuffer),
    #[allow(dead_code)]
    Unavailable,
}

#[allow(unused_variables)]
impl GpuContext {
    /// Acquire the default compute device from the first backend that
    /// produces one. Metal is tried first, then WebGPU.
    ///
    /// A backend without a device is skipped; any other failure (a dead
    /// command queue, for instance) is a real error and propagates.
    pub fn acquire() -> Result<Self> {
        #[cfg(feature = "metal-backend")]
        {
            match MetalContext::new() {
                Ok(ctx) => return Ok(GpuContext::Metal(ctx)),
                Err(GpuError::DeviceUnavailable(reason)) => {
                    log::debug!("metal backend: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }

        #[cfg(feature = "webgpu-backend")]
        {
            match WgpuContext::new() {
                Ok(ctx) => return Ok(GpuContext::Wgpu(ctx)),
                Err(GpuError::DeviceUnavailable(reason)) => {
                    log::debug!("wgpu backend: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }

        Err(GpuError::DeviceUnavailable(
            "no enabled GPU backend produced a device".into(),
        ))
    }

    /// Check if any compiled-in backend has a usable device.
    pub fn is_available() -> bool {
        #[cfg(feature = "metal-backend")]
        {
            if MetalContext::is_available() {
                return true;
            }
        }

        #[cfg(feature = "webgpu-backend")]
        {
            if WgpuContext::is_available() {
                return true;
            }
        }

        false
    }

    /// Short name of the backend behind this context.
    pub fn backend_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "metal-backend")]
            GpuContext::Metal(_) => "metal",
            #[cfg(feature = "webgpu-backend")]
            GpuContext::Wgpu(_) => "wgpu",
            GpuContext::Unavailable => "unavailable",
        }
    }

    /// Device name as reported by the platform.
    pub fn device_name(&self) -> String {
        match self {
            #[cfg(feature = "metal-backend")]
            GpuContext::Metal(ctx) => ctx.device_name(),
            #[cfg(feature = "webgpu-backend")]
            GpuContext::Wgpu(ctx) => ctx.device_name(),
            GpuContext::Unavailable => String::new(),
        }
    }

    /// Compile `kernel` in this backend's shading dialect.
    pub fn compile_kernel(&self, kernel: &KernelSource) -> Result<CompiledKernel> {
        match self {
            #[cfg(feature = "metal-backend")]
            GpuContext::Metal(ctx) => {
                compile_msl(ctx, &kernel.msl, kernel.entry_point, kernel.threadgroup_size)
                    .map(CompiledKernel::Metal)
            }
            #[cfg(feature = "webgpu-backend")]
            GpuContext::Wgpu(ctx) => {
                compile_wgsl(ctx, &kernel.wgsl, kernel.entry_point, kernel.threadgroup_size)
                    .map(CompiledKernel::Wgpu)
            }
            GpuContext::Unavailable => no_backend(),
        }
    }

    /// Upload `data` into a new device buffer.
    pub fn buffer_from_f32s(&self, data: &[f32]) -> Result<GpuBuffer> {
        match self {
            #[cfg(feature = "metal-backend")]
            GpuContext::Metal(ctx) => MetalBuffer::from_f32s(ctx, data).map(GpuBuffer::Metal),
            #[cfg(feature = "webgpu-backend")]
            GpuContext::Wgpu(ctx) => WgpuBuffer::from_f32s(ctx, data).map(GpuBuffer::Wgpu),
            GpuContext::Unavailable => no_backend(),
        }
    }

    /// Allocate an uninitialized device buffer of `byte_size` bytes.
    pub fn allocate_buffer(&self, byte_size: usize) -> Result<GpuBuffer> {
        match self {
            #[cfg(feature = "metal-backend")]
            GpuContext::Metal(ctx) => MetalBuffer::allocate(ctx, byte_size).map(GpuBuffer::Metal),
            #[cfg(feature = "webgpu-backend")]
            GpuContext::Wgpu(ctx) => WgpuBuffer::allocate(ctx, byte_size).map(GpuBuffer::Wgpu),
            GpuContext::Unavailable => no_backend(),
        }
    }

    /// Bind `buffers` to argument slots in order, run `kernel` over `numel`
    /// elements, and block until the device reports completion.
    pub fn dispatch(
        &self,
        kernel: &CompiledKernel,
        buffers: &[&GpuBuffer],
        numel: usize,
    ) -> Result<()> {
        match (self, kernel) {
            #[cfg(feature = "metal-backend")]
            (GpuContext::Metal(ctx), CompiledKernel::Metal(kernel)) => {
                let bufs = metal_buffer_refs(buffers)?;
                metal_dispatch(ctx, kernel, &bufs, numel)
            }
            #[cfg(feature = "webgpu-backend")]
            (GpuContext::Wgpu(ctx), CompiledKernel::Wgpu(kernel)) => {
                let bufs = wgpu_buffer_refs(buffers)?;
                wgpu_dispatch(ctx, kernel, &bufs, numel)
            }
            _ => Err(GpuError::Dispatch(
                "kernel was compiled for a different backend".into(),
            )),
        }
    }
}

#[allow(unused_variables)]
impl GpuBuffer {
    /// Read the first `len` f32 values back to host memory.
    pub fn read_f32s(&self, ctx: &GpuContext, len: usize) -> Result<Vec<f32>> {
        match (ctx, self) {
            #[cfg(feature = "metal-backend")]
            (GpuContext::Metal(_), GpuBuffer::Metal(buf)) => Ok(buf.read_f32s(len)),
            #[cfg(feature = "webgpu-backend")]
            (GpuContext::Wgpu(ctx), GpuBuffer::Wgpu(buf)) => buf.read_f32s(ctx, len),
            _ => Err(GpuError::Readback(
                "buffer was created by a different backend".into(),
            )),
        }
    }

    /// Byte size of the underlying allocation.
    pub fn byte_size(&self) -> usize {
        match self {
            #[cfg(feature = "metal-backend")]
            GpuBuffer::Metal(buf) => buf.byte_size(),
            #[cfg(feature = "webgpu-backend")]
            GpuBuffer::Wgpu(buf) => buf.byte_size(),
            GpuBuffer::Unavailable => 0,
        }
    }
}

#[cfg(feature = "metal-backend")]
fn metal_buffer_refs<'a>(buffers: &[&'a GpuBuffer]) -> Result<Vec<&'a MetalBuffer>> {
    buffers
        .iter()
        .map(|&b| match b {
            GpuBuffer::Metal(buf) => Ok(buf),
            _ => Err(GpuError::Dispatch(
                "buffer was created by a different backend".into(),
            )),
        })
        .collect()
}

#[cfg(feature = "webgpu-backend")]
fn wgpu_buffer_refs<'a>(buffers: &[&'a GpuBuffer]) -> Result<Vec<&'a WgpuBuffer>> {
    buffers
        .iter()
        .map(|&b| match b {
            GpuBuffer::Wgpu(buf) => Ok(buf),
            _ => Err(GpuError::Dispatch(
                "buffer was created by a different backend".into(),
            )),
        })
        .collect()
}
