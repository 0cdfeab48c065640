// Engine library root
// Pure indicator, level and pattern computations over bar series, plus the
// bar source, store and service layer that feed them.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod levels;
pub mod models;
pub mod patterns;
pub mod services;
