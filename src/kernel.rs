//! The embedded `add_arrays` kernel.
//!
//! Both dialects declare the same binding contract: argument slot 0 is the
//! first input, slot 1 the second input, slot 2 the output, with a scalar
//! thread index selecting the element. The dispatch layer binds buffers to
//! these slots by position, so the order here is load-bearing.

/// Entry point name shared by every dialect of the kernel.
pub const KERNEL_NAME: &str = "add_arrays";

/// MSL source for the Metal backend.
///
/// The grid is dispatched with exactly one thread per element
/// (`dispatchThreads`), so the body needs no bounds check.
pub const ADD_ARRAYS_MSL: &str = r#"
#include <metal_stdlib>
using namespace metal;

kernel void add_arrays(device const float* inA [[buffer(0)]],
                       device const float* inB [[buffer(1)]],
                       device float* result [[buffer(2)]],
                       uint index [[thread_position_in_grid]]) {
    result[index] = inA[index] + inB[index];
}
"#;

/// Render the WGSL source for the WebGPU backend.
///
/// The workgroup count rounds the element total up to a multiple of
/// `workgroup_size`, so tail threads past the end discard themselves
/// against `arrayLength`.
pub fn add_arrays_wgsl(workgroup_size: usize) -> String {
    format!(
        r#"@group(0) @binding(0) var<storage, read> a: array<f32>;
@group(0) @binding(1) var<storage, read> b: array<f32>;
@group(0) @binding(2) var<storage, read_write> result: array<f32>;

@compute @workgroup_size({workgroup_size})
fn add_arrays(@builtin(global_invocation_id) gid: vec3<u32>) {{
    let index = gid.x;
    if (index >= arrayLength(&a)) {{
        return;
    }}
    result[index] = a[index] + b[index];
}}
"#
    )
}

/// One kernel carried in every dialect a backend might need.
pub struct KernelSource {
    pub entry_point: &'static str,
    pub msl: String,
    pub wgsl: String,
    /// 1-D threadgroup width the WGSL was rendered with and the Metal
    /// dispatch will request.
    pub threadgroup_size: usize,
}

/// The demonstration kernel: element-wise f32 addition.
pub fn add_arrays(threadgroup_size: usize) -> KernelSource {
    KernelSource {
        entry_point: KERNEL_NAME,
        msl: ADD_ARRAYS_MSL.to_string(),
        wgsl: add_arrays_wgsl(threadgroup_size),
        threadgroup_size,
    }
}
