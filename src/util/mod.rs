//! Host-side helpers.

pub mod frame_timing;
