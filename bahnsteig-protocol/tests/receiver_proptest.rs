//! Property-based tests for the receive state machine.
//! The wire carries no checksums, so the receiver must stay well behaved
//! for arbitrary byte streams, not just well-formed ones.

use bahnsteig_core::{panel, PanelState};
use bahnsteig_protocol::Receiver;
use proptest::collection::vec;
use proptest::prelude::*;

proptest::proptest! {
    /// Any byte stream leaves every field within its capacity and the
    /// receiver able to take the next well-formed command.
    #[test]
    fn arbitrary_streams_stay_bounded(stream in vec(any::<u8>(), 0..600)) {
        let mut rx = Receiver::new();
        let mut p = PanelState::new();
        rx.feed_bytes(&stream, &mut p);

        prop_assert!(p.departure.len() <= panel::DEPARTURE_LEN);
        prop_assert!(p.train_number.len() <= panel::TRAIN_NUMBER_LEN);
        prop_assert!(p.destination.len() <= panel::DESTINATION_LEN);
        prop_assert!(p.route_line1.len() <= panel::ROUTE_LINE_LEN);
        prop_assert!(p.route_line2.len() <= panel::ROUTE_LINE_LEN);
        prop_assert!(p.scroll_text.len() <= panel::SCROLL_TEXT_LEN);
        prop_assert!(p.platform.len() <= panel::PLATFORM_LEN);
        prop_assert!(p.consist.len() <= panel::CONSIST_LEN);

        // A fresh command still lands after whatever garbage came first.
        rx.reset();
        rx.feed_bytes(b"#G3#", &mut p);
        prop_assert_eq!(p.platform.as_str(), "3");
    }

    /// Streams without a start marker never change the panel.
    #[test]
    fn no_marker_means_no_change(
        stream in vec(any::<u8>().prop_map(|b| if b == b'#' { b'.' } else { b }), 0..300)
    ) {
        let mut rx = Receiver::new();
        let mut p = PanelState::new();
        p.platform.set("3");
        p.departure.set("12:53");
        let before = p.clone();

        rx.feed_bytes(&stream, &mut p);
        prop_assert_eq!(before, p);
    }

    /// Payload round-trip: any terminator-free payload lands verbatim in
    /// the destination field, truncated at its capacity.
    #[test]
    fn destination_round_trip(
        payload in vec(any::<u8>().prop_map(|b| if b == b'#' { b'.' } else { b }), 0..40)
    ) {
        let mut rx = Receiver::new();
        let mut p = PanelState::new();
        rx.feed_bytes(b"#Z", &mut p);
        rx.feed_bytes(&payload, &mut p);
        rx.feed_bytes(b"#", &mut p);

        let expect = &payload[..payload.len().min(panel::DESTINATION_LEN)];
        prop_assert_eq!(p.destination.as_bytes(), expect);
    }
}
