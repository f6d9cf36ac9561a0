//! Board-agnostic panel state for the Bahnsteig platform display
//!
//! This crate holds everything about the display that is not hardware:
//!
//! - Fixed-capacity field buffers for the train data
//! - The panel state aggregate the renderer reads
//! - The scroll cursor for the delay banner
//!
//! The serial receiver (`bahnsteig-protocol`) writes the fields, the
//! render loop ticks the scroll cursor. Both run on one executor, so the
//! state needs no interior locking of its own.

#![no_std]
#![deny(unsafe_code)]

pub mod fields;
pub mod panel;

pub use fields::FieldBuf;
pub use panel::{PanelState, ScrollCursor, Side};
