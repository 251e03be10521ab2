//! Metal compute kernel dispatch - encodes and submits GPU work

use log::debug;
use objc2_metal::MTLCommandBuffer;
use objc2_metal::MTLCommandEncoder;
use objc2_metal::MTLCommandQueue;
use objc2_metal::MTLComputeCommandEncoder;
use objc2_metal::MTLSize;

use super::buffer_ops::MetalBuffer;
use super::compile::MetalCompiledKernel;
use super::device_init::MetalContext;
use crate::error::{GpuError, Result};

/// Dispatch a compiled compute kernel over `numel` elements and block
/// until the command buffer completes.
///
/// `buffers` bind to argument slots in order: the first buffer lands at
/// index 0. The grid is exactly `numel` threads wide; Metal handles the
/// partial trailing threadgroup.
pub fn dispatch(
    ctx: &MetalContext,
    kernel: &MetalCompiledKernel,
    buffers: &[&MetalBuffer],
    numel: usize,
) -> Result<()> {
    if numel == 0 {
        return Ok(());
    }

    let command_buffer = ctx
        .command_queue
        .commandBuffer()
        .ok_or_else(|| GpuError::Dispatch("failed to create command buffer".into()))?;

    let encoder = command_buffer
        .computeCommandEncoder()
        .ok_or_else(|| GpuError::Dispatch("failed to create compute encoder".into()))?;

    encoder.setComputePipelineState(&kernel.pipeline);

    for (i, buf) in buffers.iter().enumerate() {
        unsafe {
            encoder.setBuffer_offset_atIndex(Some(&buf.mtl_buffer), 0, i);
        }
    }

    // The pipeline caps how wide a threadgroup may be.
    let threads_per_group = kernel
        .threadgroup_size
        .min(kernel.max_threads_per_group)
        .min(numel);
    debug!(
        "dispatching {} threads in groups of {}",
        numel, threads_per_group
    );

    let grid_size = MTLSize {
        width: numel,
        height: 1,
        depth: 1,
    };
    let threadgroup_size = MTLSize {
        width: threads_per_group,
        height: 1,
        depth: 1,
    };

    encoder.dispatchThreads_threadsPerThreadgroup(grid_size, threadgroup_size);

    encoder.endEncoding();
    command_buffer.commit();
    command_buffer.waitUntilCompleted();

    Ok(())
}
