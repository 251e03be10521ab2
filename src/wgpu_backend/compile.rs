//! WGSL shader compilation - WGSL source to wgpu::ComputePipeline

use wgpu;

use super::device_init::WgpuContext;
use crate::error::{GpuError, Result};

/// A compiled wgpu compute kernel ready for dispatch.
#[derive(Debug)]
pub struct WgpuCompiledKernel {
    pub pipeline: wgpu::ComputePipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    /// 1-D workgroup width baked into the WGSL.
    pub workgroup_size: usize,
}

/// Compile WGSL source into a compute pipeline.
///
/// wgpu reports invalid shaders through the device error machinery rather
/// than a return value, so module and pipeline creation each run inside a
/// validation error scope; a captured error carries the compiler
/// diagnostic. A missing entry point surfaces at the pipeline stage. The
/// bind group layout is reflected from the shader.
pub fn compile_wgsl(
    ctx: &WgpuContext,
    source: &str,
    entry_point: &str,
    workgroup_size: usize,
) -> Result<WgpuCompiledKernel> {
    ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let shader_module = ctx
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vecadd_shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
    if let Some(e) = pollster::block_on(ctx.device.pop_error_scope()) {
        return Err(GpuError::ShaderCompile(e.to_string()));
    }

    ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = ctx
        .device
        .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("vecadd_pipeline"),
            layout: None, // derived from shader reflection
            module: &shader_module,
            entry_point: Some(entry_point),
            compilation_options: Default::default(),
            cache: None,
        });
    if let Some(e) = pollster::block_on(ctx.device.pop_error_scope()) {
        return Err(GpuError::PipelineBuild(e.to_string()));
    }

    let bind_group_layout = pipeline.get_bind_group_layout(0);

    Ok(WgpuCompiledKernel {
        pipeline,
        bind_group_layout,
        workgroup_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{add_arrays_wgsl, KERNEL_NAME};

    #[test]
    fn test_compile_add_arrays() {
        if !WgpuContext::is_available() {
            println!("wgpu not available on this system, skipping");
            return;
        }

        let ctx = WgpuContext::new().unwrap();
        let kernel =
            compile_wgsl(&ctx, &add_arrays_wgsl(64), KERNEL_NAME, 64).expect("compilation failed");
        assert_eq!(kernel.workgroup_size, 64);
    }

    #[test]
    fn test_invalid_source_carries_compiler_diagnostic() {
        if !WgpuContext::is_available() {
            println!("wgpu not available on this system, skipping");
            return;
        }

        let ctx = WgpuContext::new().unwrap();
        let err = compile_wgsl(&ctx, "fn this is not wgsl {", "broken", 64).unwrap_err();
        match err {
            GpuError::ShaderCompile(msg) => assert!(!msg.is_empty()),
            other => panic!("expected ShaderCompile, got: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_entry_point_fails_pipeline_build() {
        if !WgpuContext::is_available() {
            println!("wgpu not available on this system, skipping");
            return;
        }

        let ctx = WgpuContext::new().unwrap();
        let err = compile_wgsl(&ctx, &add_arrays_wgsl(64), "no_such_kernel", 64).unwrap_err();
        assert!(matches!(err, GpuError::PipelineBuild(_)), "got: {:?}", err);
    }
}
