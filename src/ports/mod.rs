//! Port traits for the collaborators around the signal core.

pub mod config_port;
pub mod market_data_port;
pub mod flow_data_port;
