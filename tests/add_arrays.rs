//! End-to-end dispatch tests.
//!
//! Every test returns early when no compute device is available, so the
//! suite still passes on GPU-less machines.

use vecadd::backend::GpuContext;
use vecadd::config::DispatchConfig;
use vecadd::kernel::KernelSource;
use vecadd::{logging, runner};

#[test]
fn test_add_arrays_produces_three_times_index() {
    logging::init_test();
    if !GpuContext::is_available() {
        println!("no compute device available, skipping");
        return;
    }

    let cfg = DispatchConfig::default();
    let results = runner::run(&cfg).expect("demo run failed");

    assert_eq!(results.len(), cfg.array_len);
    for (i, &actual) in results.iter().enumerate() {
        let expected = (i * 3) as f32;
        assert_eq!(actual, expected, "mismatch at index {}", i);
    }
}

#[test]
fn test_preview_is_the_reference_line() {
    logging::init_test();
    if !GpuContext::is_available() {
        println!("no compute device available, skipping");
        return;
    }

    let cfg = DispatchConfig::default();
    let results = runner::run(&cfg).expect("demo run failed");

    assert_eq!(
        runner::format_preview(&results, cfg.preview_len),
        "0 3 6 9 12 15 18 21 24 27"
    );
}

#[test]
fn test_repeated_runs_are_deterministic() {
    logging::init_test();
    if !GpuContext::is_available() {
        println!("no compute device available, skipping");
        return;
    }

    let cfg = DispatchConfig::default();
    let first = runner::run(&cfg).expect("first run failed");
    let second = runner::run(&cfg).expect("second run failed");
    assert_eq!(first, second);
}

// Addition is commutative, so swapped input bindings would slip through the
// tests above; subtraction pins argument slot 0 to the minuend.
#[test]
fn test_buffers_bind_to_slots_in_argument_order() {
    logging::init_test();
    if !GpuContext::is_available() {
        println!("no compute device available, skipping");
        return;
    }

    const SUB_MSL: &str = r#"
#include <metal_stdlib>
using namespace metal;

kernel void sub_arrays(device const float* inA [[buffer(0)]],
                       device const float* inB [[buffer(1)]],
                       device float* result [[buffer(2)]],
                       uint index [[thread_position_in_grid]]) {
    result[index] = inA[index] - inB[index];
}
"#;

    const SUB_WGSL: &str = r#"@group(0) @binding(0) var<storage, read> a: array<f32>;
@group(0) @binding(1) var<storage, read> b: array<f32>;
@group(0) @binding(2) var<storage, read_write> result: array<f32>;

@compute @workgroup_size(64)
fn sub_arrays(@builtin(global_invocation_id) gid: vec3<u32>) {
    let index = gid.x;
    if (index >= arrayLength(&a)) {
        return;
    }
    result[index] = a[index] - b[index];
}
"#;

    let kernel = KernelSource {
        entry_point: "sub_arrays",
        msl: SUB_MSL.to_string(),
        wgsl: SUB_WGSL.to_string(),
        threadgroup_size: 64,
    };

    let ctx = GpuContext::acquire().expect("device reported available but acquire failed");
    let compiled = ctx.compile_kernel(&kernel).expect("sub_arrays failed to compile");

    let n = 256;
    let minuend: Vec<f32> = (0..n).map(|i| (i * 3) as f32).collect();
    let subtrahend: Vec<f32> = (0..n).map(|i| i as f32).collect();

    let buf_a = ctx.buffer_from_f32s(&minuend).unwrap();
    let buf_b = ctx.buffer_from_f32s(&subtrahend).unwrap();
    let buf_out = ctx.allocate_buffer(n * std::mem::size_of::<f32>()).unwrap();

    ctx.dispatch(&compiled, &[&buf_a, &buf_b, &buf_out], n).unwrap();
    let results = buf_out.read_f32s(&ctx, n).unwrap();

    for (i, &actual) in results.iter().enumerate() {
        // 3i - i, not i - 3i
        let expected = (i * 2) as f32;
        assert_eq!(actual, expected, "slot order broken at index {}", i);
    }
}

#[test]
fn test_invalid_kernel_source_rejected() {
    logging::init_test();
    if !GpuContext::is_available() {
        println!("no compute device available, skipping");
        return;
    }

    let kernel = KernelSource {
        entry_point: "broken",
        msl: "kernel void broken(".to_string(),
        wgsl: "fn this is not wgsl {".to_string(),
        threadgroup_size: 64,
    };

    let ctx = GpuContext::acquire().expect("device reported available but acquire failed");
    let err = ctx.compile_kernel(&kernel);
    assert!(err.is_err(), "malformed kernel source compiled successfully");
}
