//! Core domain types and logic.

pub mod candle;
pub mod config_validation;
pub mod error;
pub mod flow;
pub mod indicator;
pub mod marker;
pub mod report;
pub mod signal;
pub mod strategy;
pub mod trend;
