//! Board configuration
//!
//! Compile-time settings for one display board. The command bus decoder
//! that feeds our UART lives on its own controller; accessory addresses
//! 5..=21 are reserved for the platform displays on this layout.

use bahnsteig_core::Side;

/// Baud rate of the command UART. The sender must match.
pub const SERIAL_BAUD: u32 = 115_200;

/// Frame period in milliseconds. The delay banner advances one sub-step
/// per frame, so this also sets the scroll speed.
pub const FRAME_MS: u64 = 50;

/// Heartbeat LED half-period in milliseconds.
pub const HEARTBEAT_MS: u64 = 500;

/// Platform number this board shows until a `#G` command arrives.
pub const PLATFORM_NUMBER: &str = "3";

/// Edge of the display carrying the platform number.
pub const PLATFORM_SIDE: Side = Side::Left;
