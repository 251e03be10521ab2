//! Workload geometry for the demonstration dispatch.

/// Number of f32 elements in each of the three buffers.
pub const ARRAY_LEN: usize = 1024;

/// Threads per threadgroup (workgroup) for the 1-D dispatch.
pub const THREADGROUP_SIZE: usize = 64;

/// How many leading results the demo prints.
pub const PREVIEW_LEN: usize = 10;

/// Geometry of one `add_arrays` run.
///
/// The reference workload is fixed, but keeping the numbers in one place
/// means a different length or group width stays a one-line change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Element count shared by both inputs and the output.
    pub array_len: usize,
    /// 1-D threadgroup width.
    pub threadgroup_size: usize,
    /// Number of leading results printed on stdout.
    pub preview_len: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            array_len: ARRAY_LEN,
            threadgroup_size: THREADGROUP_SIZE,
            preview_len: PREVIEW_LEN,
        }
    }
}

impl DispatchConfig {
    /// Byte size of one f32 buffer at this geometry.
    pub fn buffer_bytes(&self) -> usize {
        self.array_len * std::mem::size_of::<f32>()
    }
}
