//! Core types
//!
//! This module contains the fundamental types used throughout the system:
//! - Instrument: Shared identifier for trading pairs
//! - Trade: Individual trade information
//! - Clock: Wall-clock source used for window eviction

pub mod clock;
pub mod instrument;
pub mod trade;

pub use clock::{Clock, SystemClock};
pub use instrument::Instrument;
pub use trade::Trade;
