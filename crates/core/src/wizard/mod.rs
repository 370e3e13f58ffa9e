//! Multi-step interactive workflows
//!
//! Both wizards are explicit, network-bound state machines. Steps are
//! tagged variants with a single transition table each, so an invalid
//! transition is a construction-time impossibility rather than an array
//! lookup gone wrong.

pub mod export;
pub mod optimize;
pub mod ports;
pub mod progress;
