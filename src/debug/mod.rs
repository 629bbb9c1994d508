//! Debug tools for inspecting the spatial index at runtime

pub mod probe;

pub use probe::{inspect, pick, DebugProbe, ProbeEntity, ProbeReport};
