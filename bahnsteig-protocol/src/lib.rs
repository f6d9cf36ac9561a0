//! Serial command protocol for the Bahnsteig platform display
//!
//! Commands arrive as a plain ASCII byte stream with no framing and no
//! checksums. A command is a `#` start marker, one selector byte, and -
//! for field commands - the field text terminated by the next `#`:
//!
//! ```text
//! #G3#                 platform "3"
//! #U12:53##NEC 172#    departure 12:53, then train number EC 172
//! #X                   clear the current train (single-byte command)
//! #<   #>              platform number on the left / right edge
//! ```
//!
//! A terminating `#` completes the field and returns the receiver to
//! idle; it does not itself open the next command. Consecutive field
//! commands are therefore separated by `##`.
//!
//! The wire has no retransmission, so nothing here ever fails: unknown
//! selectors are ignored, overlong fields are truncated, and an
//! unterminated field simply stays open until more bytes arrive.

#![no_std]
#![deny(unsafe_code)]

pub mod messages;
pub mod receiver;

pub use messages::MessageBook;
pub use receiver::Receiver;
