//! WebGPU compute kernel dispatch - encodes and submits GPU work

use log::debug;
use wgpu;

use super::buffer_ops::WgpuBuffer;
use super::compile::WgpuCompiledKernel;
use super::device_init::WgpuContext;
use crate::error::Result;

/// Dispatch a compiled compute kernel over `numel` elements and block
/// until the submitted work completes.
///
/// `buffers` bind to `@group(0)` bindings in order: the first buffer lands
/// at binding 0. The workgroup count is `numel / workgroup_size` rounded
/// up; the shader's bounds guard discards the tail threads.
pub fn dispatch(
    ctx: &WgpuContext,
    kernel: &WgpuCompiledKernel,
    buffers: &[&WgpuBuffer],
    numel: usize,
) -> Result<()> {
    if numel == 0 {
        return Ok(());
    }

    let entries: Vec<wgpu::BindGroupEntry> = buffers
        .iter()
        .enumerate()
        .map(|(i, buf)| wgpu::BindGroupEntry {
            binding: i as u32,
            resource: buf.buffer.as_entire_binding(),
        })
        .collect();

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("vecadd_bind_group"),
        layout: &kernel.bind_group_layout,
        entries: &entries,
    });

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("vecadd_dispatch"),
        });

    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("vecadd_pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&kernel.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);

        let num_workgroups = numel.div_ceil(kernel.workgroup_size);
        debug!(
            "dispatching {} workgroups of {}",
            num_workgroups, kernel.workgroup_size
        );
        pass.dispatch_workgroups(num_workgroups as u32, 1, 1);
    }

    ctx.queue.submit(std::iter::once(encoder.finish()));
    ctx.device.poll(wgpu::Maintain::Wait);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{add_arrays_wgsl, KERNEL_NAME};
    use crate::wgpu_backend::compile::compile_wgsl;

    #[test]
    fn test_dispatch_add_arrays() {
        if !WgpuContext::is_available() {
            println!("wgpu not available on this system, skipping");
            return;
        }

        let ctx = WgpuContext::new().unwrap();
        let kernel = compile_wgsl(&ctx, &add_arrays_wgsl(64), KERNEL_NAME, 64).unwrap();

        let n = 1024;
        let a: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let b: Vec<f32> = (0..n).map(|i| (i * 2) as f32).collect();

        let buf_a = WgpuBuffer::from_f32s(&ctx, &a).unwrap();
        let buf_b = WgpuBuffer::from_f32s(&ctx, &b).unwrap();
        let buf_out = WgpuBuffer::allocate(&ctx, n * std::mem::size_of::<f32>()).unwrap();

        dispatch(&ctx, &kernel, &[&buf_a, &buf_b, &buf_out], n).unwrap();

        let results = buf_out.read_f32s(&ctx, n).unwrap();
        for (i, &actual) in results.iter().enumerate() {
            let expected = (i + i * 2) as f32;
            assert_eq!(actual, expected, "mismatch at index {}", i);
        }
    }

    #[test]
    fn test_partial_trailing_workgroup_stays_in_bounds() {
        // 100 elements in groups of 64 rounds up to 2 workgroups; the
        // guard must stop threads 100..127 from writing.
        if !WgpuContext::is_available() {
            println!("wgpu not available on this system, skipping");
            return;
        }

        let ctx = WgpuContext::new().unwrap();
        let kernel = compile_wgsl(&ctx, &add_arrays_wgsl(64), KERNEL_NAME, 64).unwrap();

        let n = 100;
        let a: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let b: Vec<f32> = (0..n).map(|i| (i * 2) as f32).collect();

        let buf_a = WgpuBuffer::from_f32s(&ctx, &a).unwrap();
        let buf_b = WgpuBuffer::from_f32s(&ctx, &b).unwrap();
        let buf_out = WgpuBuffer::allocate(&ctx, n * std::mem::size_of::<f32>()).unwrap();

        dispatch(&ctx, &kernel, &[&buf_a, &buf_b, &buf_out], n).unwrap();

        let results = buf_out.read_f32s(&ctx, n).unwrap();
        assert_eq!(results.len(), n);
        for (i, &actual) in results.iter().enumerate() {
            assert_eq!(actual, (i * 3) as f32, "mismatch at index {}", i);
        }
    }
}
