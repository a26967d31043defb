pub mod bridge;
pub mod converters;

pub use bridge::StoreBridge;
