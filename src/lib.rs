pub mod cli;
pub mod logging;
pub mod scenario;

// Re-export the container so the driver and its tests share one path.
pub use dyn_array;
