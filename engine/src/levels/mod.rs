// Price level calculations
pub mod fibonacci;

pub use fibonacci::{fibonacci_levels, FIBONACCI_RATIOS};
