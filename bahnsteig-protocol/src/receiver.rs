//! Receive state machine for the serial command stream
//!
//! Consumes one byte at a time and writes straight into the panel's
//! field buffers - there is no intermediate frame, a field is visible
//! mid-reception and fields update independently of each other.

use bahnsteig_core::{FieldBuf, PanelState, Side};

/// Field a command can write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    ScrollText,
    Platform,
    Consist,
    RouteLine1,
    RouteLine2,
    Destination,
    Departure,
    TrainNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    /// Discarding bytes until a `#` start marker.
    Idle,
    /// Got `#`; the next byte selects a field or command.
    Select,
    /// Writing payload bytes into one field.
    Receiving(Field),
}

/// Byte-at-a-time receiver for the command stream.
///
/// One instance feeds one [`PanelState`]. Every byte in every state is
/// defined; ill-formed input can at worst overwrite fields, never
/// corrupt memory or wedge the machine.
#[derive(Debug, Clone)]
pub struct Receiver {
    state: State,
}

impl Receiver {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Back to idle without touching the panel. An in-flight field keeps
    /// whatever bytes it already received.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Feed one received byte.
    pub fn feed(&mut self, byte: u8, panel: &mut PanelState) {
        match self.state {
            State::Idle => {
                if byte == b'#' {
                    self.state = State::Select;
                }
            }
            State::Select => self.select(byte, panel),
            State::Receiving(field) => self.receive(field, byte, panel),
        }
    }

    /// Feed a slice of bytes in arrival order.
    pub fn feed_bytes(&mut self, bytes: &[u8], panel: &mut PanelState) {
        for &byte in bytes {
            self.feed(byte, panel);
        }
    }

    /// Handle the selector byte after a start marker. Field selectors
    /// empty their field and start reception; command selectors act
    /// immediately and need no terminator.
    fn select(&mut self, byte: u8, panel: &mut PanelState) {
        self.state = match byte {
            b'L' => {
                panel.scroll_text.clear();
                State::Receiving(Field::ScrollText)
            }
            b'G' => {
                panel.platform.clear();
                State::Receiving(Field::Platform)
            }
            b'W' => {
                panel.consist.clear();
                State::Receiving(Field::Consist)
            }
            b'1' => {
                panel.route_line1.clear();
                State::Receiving(Field::RouteLine1)
            }
            b'2' => {
                panel.route_line2.clear();
                State::Receiving(Field::RouteLine2)
            }
            b'Z' => {
                panel.destination.clear();
                State::Receiving(Field::Destination)
            }
            b'U' => {
                panel.departure.clear();
                State::Receiving(Field::Departure)
            }
            b'N' => {
                panel.train_number.clear();
                State::Receiving(Field::TrainNumber)
            }
            b'X' => {
                #[cfg(feature = "defmt")]
                defmt::debug!("train cleared");
                panel.clear_train();
                State::Idle
            }
            b'<' => {
                panel.side = Side::Left;
                State::Idle
            }
            b'>' => {
                panel.side = Side::Right;
                State::Idle
            }
            _ => {
                // Unknown selector: drop the command, touch nothing.
                #[cfg(feature = "defmt")]
                defmt::debug!("unknown selector {=u8:#x}", byte);
                State::Idle
            }
        };
    }

    /// Handle one payload byte for `field`.
    fn receive(&mut self, field: Field, byte: u8, panel: &mut PanelState) {
        let done = match field {
            Field::ScrollText => fixed(&mut panel.scroll_text, byte),
            Field::RouteLine1 => fixed(&mut panel.route_line1, byte),
            Field::RouteLine2 => fixed(&mut panel.route_line2, byte),
            Field::Destination => fixed(&mut panel.destination, byte),
            Field::Departure => fixed(&mut panel.departure, byte),
            Field::TrainNumber => fixed(&mut panel.train_number, byte),
            Field::Platform => append(&mut panel.platform, byte),
            Field::Consist => append(&mut panel.consist, byte),
        };

        if done {
            if field == Field::ScrollText {
                // A fresh delay text scrolls in from its beginning.
                panel.scroll.reset();
            }
            #[cfg(feature = "defmt")]
            defmt::trace!("{} complete", field);
            self.state = State::Idle;
        }
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

/// One payload byte for a fixed-capacity field. A full buffer ends the
/// field exactly like the `#` terminator does; the overflowing byte is
/// dropped with it.
fn fixed<const N: usize>(buf: &mut FieldBuf<N>, byte: u8) -> bool {
    if byte == b'#' || buf.is_full() {
        true
    } else {
        let _ = buf.push(byte);
        false
    }
}

/// One payload byte for an append-only field. Only `#` ends it; bytes
/// past the storage capacity are dropped, reception continues.
fn append<const N: usize>(buf: &mut FieldBuf<N>, byte: u8) -> bool {
    if byte == b'#' {
        true
    } else {
        let _ = buf.push(byte);
        false
    }
}
