//! Reader core: dataset, search, view state and detail derivation.
//!
//! Nothing in here touches the terminal.

pub mod dataset;
pub mod detail;
pub mod logging;
pub mod search;
pub mod session;
