//! WebGPU buffer operations - GPU memory allocation and data transfer

use wgpu;
use wgpu::util::DeviceExt;

use super::device_init::WgpuContext;
use crate::error::{GpuError, Result};

/// WebGPU-specific GPU buffer usable as a storage binding.
#[derive(Debug)]
pub struct WgpuBuffer {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) byte_size: usize,
}

impl WgpuBuffer {
    /// Create a storage buffer holding a copy of `data`.
    pub fn from_f32s(ctx: &WgpuContext, data: &[f32]) -> Result<Self> {
        if data.is_empty() {
            return Err(GpuError::Allocation("empty input slice".into()));
        }

        let contents: &[u8] = bytemuck::cast_slice(data);
        let buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vecadd_input"),
                contents,
                usage: wgpu::BufferUsages::STORAGE
                    | wgpu::BufferUsages::COPY_SRC
                    | wgpu::BufferUsages::COPY_DST,
            });

        Ok(WgpuBuffer {
            buffer,
            byte_size: contents.len(),
        })
    }

    /// Allocate a storage buffer of `byte_size` bytes.
    pub fn allocate(ctx: &WgpuContext, byte_size: usize) -> Result<Self> {
        if byte_size == 0 {
            return Err(GpuError::Allocation("zero-byte buffer".into()));
        }

        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vecadd_output"),
            size: byte_size as u64,
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_SRC
                | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(WgpuBuffer { buffer, byte_size })
    }

    /// Copy the first `len` f32 elements back to host memory.
    ///
    /// Storage buffers are not host-mappable, so the data moves through a
    /// MAP_READ staging buffer: copy, submit, map, block on the map signal.
    pub fn read_f32s(&self, ctx: &WgpuContext, len: usize) -> Result<Vec<f32>> {
        let read_size = (len * std::mem::size_of::<f32>()).min(self.byte_size);
        if read_size == 0 {
            return Ok(Vec::new());
        }

        let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vecadd_staging"),
            size: read_size as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vecadd_readback"),
            });
        encoder.copy_buffer_to_buffer(&self.buffer, 0, &staging, 0, read_size as u64);
        ctx.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        ctx.device.poll(wgpu::Maintain::Wait);

        match rx.recv() {
            Ok(Ok(())) => {
                let data = slice.get_mapped_range().to_vec();
                staging.unmap();
                Ok(bytemuck::cast_slice(&data).to_vec())
            }
            Ok(Err(e)) => Err(GpuError::Readback(e.to_string())),
            Err(_) => Err(GpuError::Readback("map_async callback dropped".into())),
        }
    }

    /// Byte size of the buffer.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }
}
