//! Core data models for the SoF agent.

mod currency;
mod laytime;
mod port_event;

pub use currency::*;
pub use laytime::*;
pub use port_event::*;
