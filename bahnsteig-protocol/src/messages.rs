//! Canned message table
//!
//! Factory and demo content lives in one flat text table embedded in the
//! firmware, so the panel shows something sensible with no command
//! source attached.
//!
//! An entry starts with `§` and carries `|`-separated fields in the
//! order departure time, train number, destination, route line 1,
//! route line 2, consist, scroll text:
//!
//! ```text
//! §12:53|EC 172|Hamburg - Altona|Berlin Hbf - |Hamburg Hbf|-222211|Verspaetung ca 10 Min
//! ```
//!
//! A field starting with `#` is not field content but an inline command
//! in the wire grammar (for example `#G9 ¾` to set the platform
//! number); it is replayed through the [`Receiver`] and does not consume
//! a field slot. An entry may consist of nothing but such a command.
//! Missing trailing fields leave their slots unchanged.

use bahnsteig_core::PanelState;

use crate::receiver::Receiver;

/// Marks the start of a table entry.
pub const ENTRY_START: char = '§';

/// Separates fields within an entry.
pub const FIELD_SEP: char = '|';

/// Iterate over the entries of a message table. Anything before the
/// first `§` (headers, comments) is skipped.
pub fn entries(table: &str) -> impl Iterator<Item = &str> {
    table
        .split(ENTRY_START)
        .skip(1)
        .map(|entry| entry.trim_end_matches(['\r', '\n']))
}

/// Apply one table entry to the panel.
pub fn apply(entry: &str, rx: &mut Receiver, panel: &mut PanelState) {
    let mut slot = 0;
    for field in entry.split(FIELD_SEP) {
        if field.starts_with('#') {
            rx.feed_bytes(field.as_bytes(), panel);
            rx.feed(b'#', panel); // terminate a field command
            rx.reset(); // drop the start marker the terminator opened
            continue;
        }
        match slot {
            0 => panel.departure.set(field),
            1 => panel.train_number.set(field),
            2 => panel.destination.set(field),
            3 => panel.route_line1.set(field),
            4 => panel.route_line2.set(field),
            5 => panel.consist.set(field),
            6 => {
                panel.scroll_text.set(field);
                panel.scroll.reset();
            }
            _ => {}
        }
        slot += 1;
    }
}

/// Cycles through the entries of an embedded message table.
pub struct MessageBook {
    table: &'static str,
    index: usize,
}

impl MessageBook {
    pub const fn new(table: &'static str) -> Self {
        Self { table, index: 0 }
    }

    pub fn len(&self) -> usize {
        entries(self.table).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply the current entry to the panel and move on to the next one,
    /// wrapping at the end of the table. Does nothing for an empty table.
    pub fn show_next(&mut self, rx: &mut Receiver, panel: &mut PanelState) {
        let count = self.len();
        if count == 0 {
            return;
        }
        if let Some(entry) = entries(self.table).nth(self.index) {
            #[cfg(feature = "defmt")]
            defmt::debug!("showing message {=usize}", self.index);
            apply(entry, rx, panel);
        }
        self.index = (self.index + 1) % count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahnsteig_core::Side;

    const TABLE: &str = "\
# demo content, one entry per line
§22:24|ICE 153|Mainz Hbf|Schlier ueber| Karlsruhe nach|-222F--|+++ Vorsicht: ICE faehrt durch +++
§09:34|RB 1521|Aschaffenburg|Grossauheim - Kahl|- Grosskrotzenburg||
§#G9 ¾|11:00|Hg-Exp|Hogsmeade|King's Cross|- nonstop -|-------
§#LDiese Zeile veraendert nur den Lauftext
";

    #[test]
    fn test_entries_skip_header() {
        assert_eq!(entries(TABLE).count(), 4);
        let first = entries(TABLE).next().unwrap();
        assert!(first.starts_with("22:24"));
    }

    #[test]
    fn test_apply_assigns_fields_in_order() {
        let mut rx = Receiver::new();
        let mut panel = PanelState::new();
        let entry = entries(TABLE).next().unwrap();
        apply(entry, &mut rx, &mut panel);

        assert_eq!(panel.departure.as_str(), "22:24");
        assert_eq!(panel.train_number.as_str(), "ICE 153");
        assert_eq!(panel.destination.as_str(), "Mainz Hbf");
        assert_eq!(panel.route_line1.as_str(), "Schlier ueber");
        assert_eq!(panel.route_line2.as_str(), " Karlsruhe nach");
        assert_eq!(panel.consist.as_str(), "-222F--");
        assert_eq!(
            panel.scroll_text.as_str(),
            "+++ Vorsicht: ICE faehrt durch +++"
        );
        assert_eq!(panel.scroll.offset, 0);
    }

    #[test]
    fn test_empty_fields_clear_their_slots() {
        let mut rx = Receiver::new();
        let mut panel = PanelState::new();
        panel.consist.set("11111");
        panel.scroll_text.set("stale");

        let entry = entries(TABLE).nth(1).unwrap();
        apply(entry, &mut rx, &mut panel);

        assert_eq!(panel.train_number.as_str(), "RB 1521");
        assert!(panel.consist.is_empty());
        assert!(panel.scroll_text.is_empty());
    }

    #[test]
    fn test_inline_command_does_not_consume_a_slot() {
        let mut rx = Receiver::new();
        let mut panel = PanelState::new();
        let entry = entries(TABLE).nth(2).unwrap();
        apply(entry, &mut rx, &mut panel);

        // `#G9 ¾` set the platform; the following field is still the
        // departure time.
        assert_eq!(panel.platform.as_str(), "9 ¾");
        assert_eq!(panel.departure.as_str(), "11:00");
        assert_eq!(panel.train_number.as_str(), "Hg-Exp");
        assert_eq!(panel.destination.as_str(), "Hogsmeade");
    }

    #[test]
    fn test_command_only_entry_touches_nothing_else() {
        let mut rx = Receiver::new();
        let mut panel = PanelState::new();
        panel.departure.set("17:02");
        panel.train_number.set("IC 602");

        let entry = entries(TABLE).nth(3).unwrap();
        apply(entry, &mut rx, &mut panel);

        assert_eq!(
            panel.scroll_text.as_str(),
            "Diese Zeile veraendert nur den Lauftext"
        );
        assert_eq!(panel.departure.as_str(), "17:02");
        assert_eq!(panel.train_number.as_str(), "IC 602");
    }

    #[test]
    fn test_inline_side_command() {
        let mut rx = Receiver::new();
        let mut panel = PanelState::new();
        apply("#>|08:15|RE 7", &mut rx, &mut panel);
        assert_eq!(panel.side, Side::Right);
        assert_eq!(panel.departure.as_str(), "08:15");
        assert_eq!(panel.train_number.as_str(), "RE 7");
    }

    #[test]
    fn test_book_cycles_and_wraps() {
        let mut book = MessageBook::new(TABLE);
        let mut rx = Receiver::new();
        let mut panel = PanelState::new();

        book.show_next(&mut rx, &mut panel);
        assert_eq!(panel.train_number.as_str(), "ICE 153");

        book.show_next(&mut rx, &mut panel);
        assert_eq!(panel.train_number.as_str(), "RB 1521");

        book.show_next(&mut rx, &mut panel);
        book.show_next(&mut rx, &mut panel);
        // Wrapped around to the first entry.
        book.show_next(&mut rx, &mut panel);
        assert_eq!(panel.train_number.as_str(), "ICE 153");
    }

    #[test]
    fn test_empty_table_is_harmless() {
        let mut book = MessageBook::new("no entries here\n");
        let mut rx = Receiver::new();
        let mut panel = PanelState::new();
        book.show_next(&mut rx, &mut panel);
        assert!(book.is_empty());
        assert!(panel.departure.is_empty());
    }
}
