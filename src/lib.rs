//! GPU element-wise vector addition demo.
//!
//! One embedded `add_arrays` kernel dispatched over three f32 buffers:
//! device acquisition, shader compilation, pipeline construction, input
//! upload, a single 1-D grid dispatch, synchronous wait, readback. Backed
//! by Metal (`metal-backend`, macOS) or WebGPU (`webgpu-backend`, default,
//! via wgpu); the context picks the first backend with a usable device.

pub mod backend;
pub mod config;
pub mod error;
pub mod kernel;
pub mod logging;
pub mod runner;

#[cfg(feature = "metal-backend")]
pub mod metal;

#[cfg(feature = "webgpu-backend")]
pub mod wgpu_backend;

pub use backend::{CompiledKernel, GpuBuffer, GpuContext};
pub use config::DispatchConfig;
pub use error::{GpuError, Result};
