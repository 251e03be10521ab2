//! The demonstration run - from device acquisition to the printed line.
//!
//! One linear pass: acquire a context, compile the embedded kernel, stage
//! the inputs, dispatch, read back. Nothing survives the call; dropping
//! the buffers and the context releases every device handle.

use log::{debug, info};

use crate::backend::GpuContext;
use crate::config::DispatchConfig;
use crate::error::Result;
use crate::kernel;

/// Deterministic demo inputs: `a[i] = i`, `b[i] = 2 * i`.
pub fn input_data(len: usize) -> (Vec<f32>, Vec<f32>) {
    let a = (0..len).map(|i| i as f32).collect();
    let b = (0..len).map(|i| (i * 2) as f32).collect();
    (a, b)
}

/// Run `add_arrays` over `cfg.array_len` elements and return all sums.
pub fn run(cfg: &DispatchConfig) -> Result<Vec<f32>> {
    let ctx = GpuContext::acquire()?;
    info!("using {} device: {}", ctx.backend_name(), ctx.device_name());

    let compiled = ctx.compile_kernel(&kernel::add_arrays(cfg.threadgroup_size))?;
    debug!(
        "compiled '{}' for threadgroups of {}",
        kernel::KERNEL_NAME,
        cfg.threadgroup_size
    );

    let (a, b) = input_data(cfg.array_len);
    let buf_a = ctx.buffer_from_f32s(&a)?;
    let buf_b = ctx.buffer_from_f32s(&b)?;
    let buf_out = ctx.allocate_buffer(cfg.buffer_bytes())?;
    debug!(
        "staged {} elements ({} bytes per buffer)",
        cfg.array_len,
        buf_out.byte_size()
    );

    ctx.dispatch(&compiled, &[&buf_a, &buf_b, &buf_out], cfg.array_len)?;

    buf_out.read_f32s(&ctx, cfg.array_len)
}

/// Format the first `preview_len` results as the demo's stdout line.
///
/// Whole-valued floats print without a fractional part, so the reference
/// workload renders as `0 3 6 9 ...`.
pub fn format_preview(results: &[f32], preview_len: usize) -> String {
    results
        .iter()
        .take(preview_len)
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_data_values() {
        let (a, b) = input_data(8);
        assert_eq!(a.len(), 8);
        assert_eq!(b.len(), 8);
        for i in 0..8 {
            assert_eq!(a[i], i as f32);
            assert_eq!(b[i], (i * 2) as f32);
        }
    }

    #[test]
    fn test_preview_matches_reference_line() {
        let results: Vec<f32> = (0..1024).map(|i| (i * 3) as f32).collect();
        assert_eq!(format_preview(&results, 10), "0 3 6 9 12 15 18 21 24 27");
    }

    #[test]
    fn test_preview_short_results() {
        let results = [0.0f32, 3.0, 6.0];
        assert_eq!(format_preview(&results, 10), "0 3 6");
    }

    #[test]
    fn test_preview_empty_results() {
        assert_eq!(format_preview(&[], 10), "");
    }
}
