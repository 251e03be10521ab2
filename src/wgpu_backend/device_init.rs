//! WebGPU device initialization via wgpu

use wgpu;

use crate::error::{GpuError, Result};

/// WebGPU-specific GPU context wrapping device + queue.
pub struct WgpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_info: wgpu::AdapterInfo,
}

impl WgpuContext {
    /// Create a new wgpu context using the best available adapter.
    ///
    /// The device and queue arrive together from `request_device`, so a
    /// failure here means no usable device rather than a queue problem.
    pub fn new() -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| GpuError::DeviceUnavailable("no wgpu adapter found".into()))?;

        let adapter_info = adapter.get_info();

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("vecadd"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
            None,
        ))
        .map_err(|e| GpuError::DeviceUnavailable(format!("failed to create device: {}", e)))?;

        Ok(WgpuContext {
            device,
            queue,
            adapter_info,
        })
    }

    /// Check if a wgpu adapter is available on this system.
    pub fn is_available() -> bool {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .is_some()
    }

    /// Adapter name as reported by the driver.
    pub fn device_name(&self) -> String {
        self.adapter_info.name.clone()
    }
}
