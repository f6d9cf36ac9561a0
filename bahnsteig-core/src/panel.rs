//! Panel state
//!
//! The single source of truth for one display panel: all train data
//! fields, which edge carries the platform number, and the scroll cursor
//! of the delay banner. The serial receiver writes the fields, the
//! render loop ticks the cursor, the renderer only reads.

use crate::fields::FieldBuf;

/// Content capacities of the fixed fields, in bytes.
pub const DEPARTURE_LEN: usize = 5;
pub const TRAIN_NUMBER_LEN: usize = 7;
pub const DESTINATION_LEN: usize = 16;
pub const ROUTE_LINE_LEN: usize = 20;
pub const SCROLL_TEXT_LEN: usize = 120;

/// Storage for the append-only fields. Platform numbers and consist
/// strings are short; 32 bytes is generous.
pub const PLATFORM_LEN: usize = 32;
pub const CONSIST_LEN: usize = 32;

/// Characters of scroll text visible at once.
pub const SCROLL_WINDOW: usize = 20;

/// Frames per one-character scroll step.
pub const SCROLL_SUBSTEPS: u8 = 4;

/// Which edge of the display carries the platform number.
///
/// The data column and route column swap sides along with it, so a panel
/// can sit on either end of the station without mirrored artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Scroll position of the delay banner: byte offset into the scroll
/// text plus a sub-character step for pixel-smooth movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollCursor {
    pub offset: usize,
    pub substep: u8,
}

impl ScrollCursor {
    pub const fn new() -> Self {
        Self { offset: 0, substep: 0 }
    }

    /// Back to the start of the text.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.substep = 0;
    }

    /// Jump one whole character ahead, wrapping past the end of a text
    /// of `text_len` bytes.
    pub fn advance(&mut self, text_len: usize) {
        self.substep = 0;
        self.offset += 1;
        if self.offset > text_len {
            self.offset = 0;
        }
    }

    /// Advance one frame: [`SCROLL_SUBSTEPS`] frames move the window by
    /// one character. Total for any `text_len`, including 0.
    pub fn tick(&mut self, text_len: usize) {
        self.substep += 1;
        if self.substep >= SCROLL_SUBSTEPS {
            self.advance(text_len);
        } else if self.offset > text_len {
            // Text may have been replaced by a shorter one mid-scroll.
            self.offset = 0;
        }
    }
}

impl Default for ScrollCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub departure: FieldBuf<DEPARTURE_LEN>,
    pub train_number: FieldBuf<TRAIN_NUMBER_LEN>,
    pub destination: FieldBuf<DESTINATION_LEN>,
    pub route_line1: FieldBuf<ROUTE_LINE_LEN>,
    pub route_line2: FieldBuf<ROUTE_LINE_LEN>,
    pub consist: FieldBuf<CONSIST_LEN>,
    pub platform: FieldBuf<PLATFORM_LEN>,
    pub scroll_text: FieldBuf<SCROLL_TEXT_LEN>,
    pub side: Side,
    pub scroll: ScrollCursor,
}

impl PanelState {
    /// An empty panel, platform number on the left edge. Const so the
    /// state can live in a `static`.
    pub const fn new() -> Self {
        Self {
            departure: FieldBuf::new(),
            train_number: FieldBuf::new(),
            destination: FieldBuf::new(),
            route_line1: FieldBuf::new(),
            route_line2: FieldBuf::new(),
            consist: FieldBuf::new(),
            platform: FieldBuf::new(),
            scroll_text: FieldBuf::new(),
            side: Side::Left,
            scroll: ScrollCursor::new(),
        }
    }

    /// Clear the per-train fields. The platform number and the scroll
    /// text belong to the station, not the train, and stay.
    pub fn clear_train(&mut self) {
        self.train_number.clear();
        self.departure.clear();
        self.destination.clear();
        self.route_line1.clear();
        self.route_line2.clear();
        self.consist.clear();
    }

    /// Advance the delay banner by one frame.
    pub fn tick_scroll(&mut self) {
        self.scroll.tick(self.scroll_text.len());
    }

    /// Skip the delay banner one whole character ahead.
    pub fn nudge_scroll(&mut self) {
        self.scroll.advance(self.scroll_text.len());
    }

    /// Whether the delay banner row is drawn at all. Short texts fit the
    /// static layout and never earn the inverted banner.
    pub fn banner_visible(&self) -> bool {
        self.scroll_text.len() > SCROLL_WINDOW
    }

    /// The currently visible slice of the scroll text and the sub-pixel
    /// shift to draw it at.
    pub fn scroll_window(&self) -> (&[u8], u8) {
        let text = self.scroll_text.as_bytes();
        let start = self.scroll.offset.min(text.len());
        let end = (start + SCROLL_WINDOW).min(text.len());
        (&text[start..end], self.scroll.substep)
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_with_scroll(text: &str) -> PanelState {
        let mut panel = PanelState::new();
        panel.scroll_text.set(text);
        panel
    }

    #[test]
    fn test_scroll_wraps_after_full_traversal() {
        let mut panel = panel_with_scroll("0123456789");

        // Four frames per character, ten characters, then one more step
        // to run past the end and wrap.
        let mut wraps = 0;
        for _ in 0..44 {
            let before = panel.scroll.offset;
            panel.tick_scroll();
            if before != 0 && panel.scroll.offset == 0 {
                wraps += 1;
            }
        }
        assert_eq!(wraps, 1);
        assert_eq!(panel.scroll.offset, 0);
    }

    #[test]
    fn test_scroll_step_cadence() {
        let mut panel = panel_with_scroll("0123456789");
        for _ in 0..3 {
            panel.tick_scroll();
        }
        assert_eq!(panel.scroll.offset, 0);
        panel.tick_scroll();
        assert_eq!(panel.scroll.offset, 1);
        assert_eq!(panel.scroll.substep, 0);
    }

    #[test]
    fn test_scroll_empty_text_stays_put() {
        let mut panel = PanelState::new();
        for _ in 0..20 {
            panel.tick_scroll();
        }
        assert_eq!(panel.scroll.offset, 0);
    }

    #[test]
    fn test_scroll_clamps_when_text_shrinks() {
        let mut panel = panel_with_scroll("a longer delay text");
        panel.scroll.offset = 15;
        panel.scroll_text.set("kurz");
        panel.tick_scroll();
        assert_eq!(panel.scroll.offset, 0);
    }

    #[test]
    fn test_nudge_moves_one_character() {
        let mut panel = panel_with_scroll("0123456789");
        panel.scroll.substep = 2;
        panel.nudge_scroll();
        assert_eq!(panel.scroll.offset, 1);
        assert_eq!(panel.scroll.substep, 0);
    }

    #[test]
    fn test_clear_train_keeps_station_fields() {
        let mut panel = panel_with_scroll("+++ Zug faellt aus +++");
        panel.platform.set("3");
        panel.train_number.set("ICE 153");
        panel.departure.set("22:24");
        panel.destination.set("Mainz Hbf");
        panel.route_line1.set("Schlier ueber");
        panel.route_line2.set(" Karlsruhe nach");
        panel.consist.set("-222F--");

        panel.clear_train();

        assert!(panel.train_number.is_empty());
        assert!(panel.departure.is_empty());
        assert!(panel.destination.is_empty());
        assert!(panel.route_line1.is_empty());
        assert!(panel.route_line2.is_empty());
        assert!(panel.consist.is_empty());
        assert_eq!(panel.platform.as_str(), "3");
        assert_eq!(panel.scroll_text.as_str(), "+++ Zug faellt aus +++");
    }

    #[test]
    fn test_banner_visibility_threshold() {
        let mut panel = panel_with_scroll("12345678901234567890");
        assert!(!panel.banner_visible());
        panel.scroll_text.push(b'!');
        assert!(panel.banner_visible());
    }

    #[test]
    fn test_scroll_window_slides() {
        let mut panel = panel_with_scroll("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        let (window, shift) = panel.scroll_window();
        assert_eq!(window, b"ABCDEFGHIJKLMNOPQRST");
        assert_eq!(shift, 0);

        panel.scroll.offset = 10;
        panel.scroll.substep = 2;
        let (window, shift) = panel.scroll_window();
        assert_eq!(window, b"KLMNOPQRSTUVWXYZ");
        assert_eq!(shift, 2);
    }

    #[test]
    fn test_scroll_window_handles_stale_offset() {
        let mut panel = panel_with_scroll("ABC");
        panel.scroll.offset = 7;
        let (window, _) = panel.scroll_window();
        assert!(window.is_empty());
    }
}
