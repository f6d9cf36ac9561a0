//! Panel layout
//!
//! Draws one frame of the 128x32 departure board. The platform number
//! sits on the outer edge of the display; the train data column (time,
//! train number, consist) takes the opposite corner and the route block
//! fills the middle, so panels can hang on either end of the platform:
//!
//! ```text
//! ┌────┬────────────────────────┬──────┐
//! │    │ ███ delay banner ████  │12:53 │
//! │ 3  │ Berlin Hbf -           │EC 172│
//! │    │ Hamburg Hbf            │ABCDEFG
//! │    │ Hamburg - Altona       │█22211│
//! └────┴────────────────────────┴──────┘
//! ```

use bahnsteig_core::{PanelState, Side};
use embedded_graphics::mono_font::iso_8859_1::{FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13_BOLD};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

/// Display width in pixels.
const WIDTH: i32 = 128;

/// Width of the delay banner box.
const BANNER_WIDTH: u32 = 78;

/// Coach letters over the consist row. Seven coaches fit a platform.
const COACH_LETTERS: &str = "ABCDEFG";

/// Draw one frame of the panel.
pub fn draw<D>(target: &mut D, panel: &PanelState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let small = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    let small_inverted = MonoTextStyle::new(&FONT_4X6, BinaryColor::Off);
    let time_font = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    let destination_font = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let platform_font = MonoTextStyle::new(&FONT_6X13_BOLD, BinaryColor::On);

    // Column anchors swap with the platform-number edge.
    let (data_x, route_x) = match panel.side {
        Side::Left => (100, 20),
        Side::Right => (0, 30),
    };

    // Train data column: departure time over the train number.
    Text::with_baseline(
        panel.departure.as_str(),
        Point::new(data_x, 0),
        time_font,
        Baseline::Top,
    )
    .draw(target)?;
    Text::with_baseline(
        panel.train_number.as_str(),
        Point::new(data_x, 7),
        small,
        Baseline::Top,
    )
    .draw(target)?;

    // Consist: coach letters over the inverted occupancy row.
    if !panel.consist.is_empty() {
        Text::with_baseline(COACH_LETTERS, Point::new(data_x, 15), small, Baseline::Top)
            .draw(target)?;
        let row_width = (panel.consist.len() as u32) * 4;
        Rectangle::new(Point::new(data_x, 21), Size::new(row_width, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)?;
        Text::with_baseline(
            panel.consist.as_str(),
            Point::new(data_x, 21),
            small_inverted,
            Baseline::Top,
        )
        .draw(target)?;
    }

    // Scrolling delay banner across the top of the route block.
    if panel.banner_visible() {
        Rectangle::new(Point::new(route_x, 0), Size::new(BANNER_WIDTH, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)?;
        let (window, shift) = panel.scroll_window();
        if let Ok(text) = core::str::from_utf8(window) {
            // Inverted glyphs outside the banner box land on unlit
            // pixels and stay invisible, so no clipping is needed.
            Text::with_baseline(
                text,
                Point::new(route_x - shift as i32, 0),
                small_inverted,
                Baseline::Top,
            )
            .draw(target)?;
        }
    }

    // Route block: two via lines, destination along the bottom edge.
    Text::with_baseline(
        panel.route_line1.as_str(),
        Point::new(route_x, 7),
        small,
        Baseline::Top,
    )
    .draw(target)?;
    Text::with_baseline(
        panel.route_line2.as_str(),
        Point::new(route_x, 14),
        small,
        Baseline::Top,
    )
    .draw(target)?;
    Text::with_baseline(
        panel.destination.as_str(),
        Point::new(route_x, 32),
        destination_font,
        Baseline::Bottom,
    )
    .draw(target)?;

    // Platform number on the outer edge.
    let platform = panel.platform.as_str();
    let platform_x = match panel.side {
        Side::Left => 0,
        Side::Right => WIDTH - 6 * platform.chars().count() as i32,
    };
    Text::new(platform, Point::new(platform_x, 13), platform_font).draw(target)?;

    Ok(())
}
