//! Push-button input
//!
//! The board's buttons are active low against an internal pull-up. A
//! press fires once on the falling edge after a debounce interval;
//! holding the button does not repeat.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

/// What a pressed button asks the display to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Show the next canned message from the embedded table.
    NextMessage,
    /// Skip the delay banner one character ahead.
    NudgeScroll,
}

/// Wait for one debounced press on an active-low input.
pub async fn wait_for_press(btn: &mut Input<'static>) {
    loop {
        btn.wait_for_falling_edge().await;

        // Debounce
        Timer::after(Duration::from_millis(20)).await;

        if btn.is_low() {
            btn.wait_for_rising_edge().await;
            // Debounce after release
            Timer::after(Duration::from_millis(50)).await;
            return;
        }
    }
}
