//! CLI library components for the kashmir schema matcher.

pub mod logging;
pub mod pipeline;
