//! Error types for the GPU pipeline.

use thiserror::Error;

/// Failures surfaced while setting up or running a compute dispatch.
///
/// Every variant is fatal to the demo: the binary prints the message to
/// stderr and exits with status 1.
#[derive(Debug, Error)]
pub enum GpuError {
    /// No usable compute device on this system.
    #[error("no compute device available: {0}")]
    DeviceUnavailable(String),

    /// Command queue creation failed on an otherwise valid device.
    #[error("command queue creation failed: {0}")]
    QueueCreation(String),

    /// Kernel source was rejected by the platform shader compiler.
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    /// Entry point missing from a successfully compiled library.
    #[error("kernel function '{0}' not found in compiled library")]
    KernelLookup(String),

    /// Pipeline state creation failed for a valid kernel function.
    #[error("compute pipeline creation failed: {0}")]
    PipelineBuild(String),

    /// Device buffer allocation failed or was given an unusable size.
    #[error("buffer allocation failed: {0}")]
    Allocation(String),

    /// Command buffer or encoder could not be created, or encoding failed.
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// Output buffer could not be copied back to host memory.
    #[error("readback failed: {0}")]
    Readback(String),
}

/// Specialized Result type for GPU operations.
pub type Result<T> = std::result::Result<T, GpuError>;
