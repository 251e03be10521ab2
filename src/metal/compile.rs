//! Metal shader compilation - MSL source to MTLComputePipelineState

use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2_foundation::NSString;
use objc2_metal::{MTLComputePipelineState, MTLDevice, MTLLibrary};

use super::device_init::MetalContext;
use crate::error::{GpuError, Result};

/// A compiled Metal compute kernel ready for dispatch.
pub struct MetalCompiledKernel {
    pub pipeline: Retained<ProtocolObject<dyn MTLComputePipelineState>>,
    /// Hardware cap on threads per threadgroup for this pipeline.
    pub max_threads_per_group: usize,
    /// Requested 1-D threadgroup width.
    pub threadgroup_size: usize,
}

/// Compile MSL source into a compute pipeline state.
///
/// `fn_name` must name a `kernel` function in the source. Compilation,
/// function lookup, and pipeline creation each fail with their own error
/// so a bad shader is distinguishable from a missing entry point.
pub fn compile_msl(
    ctx: &MetalContext,
    source: &str,
    fn_name: &str,
    threadgroup_size: usize,
) -> Result<MetalCompiledKernel> {
    let source_ns = NSString::from_str(source);
    let library: Retained<ProtocolObject<dyn MTLLibrary>> = ctx
        .device
        .newLibraryWithSource_options_error(&source_ns, None)
        .map_err(|e| GpuError::ShaderCompile(e.to_string()))?;

    let fn_name_ns = NSString::from_str(fn_name);
    let function = library
        .newFunctionWithName(&fn_name_ns)
        .ok_or_else(|| GpuError::KernelLookup(fn_name.to_string()))?;

    let pipeline: Retained<ProtocolObject<dyn MTLComputePipelineState>> = ctx
        .device
        .newComputePipelineStateWithFunction_error(&function)
        .map_err(|e| GpuError::PipelineBuild(e.to_string()))?;

    let max_threads_per_group = pipeline.maxTotalThreadsPerThreadgroup() as usize;

    Ok(MetalCompiledKernel {
        pipeline,
        max_threads_per_group,
        threadgroup_size,
    })
}
