//! Bahnsteig platform display firmware
//!
//! Drives one 128x32 OLED departure board for a model railway station.
//! Train data arrives as an ASCII command stream on UART0; two push
//! buttons cycle through the embedded message table and nudge the
//! scrolling delay text. The layout's command-bus decoder feeds the
//! UART, this board only listens.

#![no_std]
#![no_main]

mod button;
mod config;
mod layout;
mod ssd1306;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Read;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bahnsteig_core::PanelState;
use bahnsteig_protocol::{MessageBook, Receiver};

use crate::button::ButtonEvent;
use crate::ssd1306::Ssd1306;

/// Factory message table (compiled into the firmware, validated by the
/// build script). Edit messages.txt and rebuild to customize.
const MESSAGES: &str = include_str!("../messages.txt");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Shared panel state: the receive and control tasks write, the render
/// task ticks the scroll cursor and reads.
static PANEL: Mutex<CriticalSectionRawMutex, PanelState> = Mutex::new(PanelState::new());

/// Button events from the input tasks.
static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, 4> = Channel::new();

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bahnsteig firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Board defaults before the first frame renders.
    {
        let mut panel = PANEL.lock().await;
        panel.platform.set(config::PLATFORM_NUMBER);
        panel.side = config::PLATFORM_SIDE;
    }

    // Setup I2C for the OLED (GPIO4=SDA, GPIO5=SCL)
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());

    let mut display = Ssd1306::new(i2c);
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("OLED initialized");
    }

    // Setup UART for the command stream (GPIO0=TX unused, GPIO1=RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::SERIAL_BAUD;

    let tx_buf = TX_BUF.init([0u8; 32]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("UART initialized for command input");

    // Buttons (active low): GPIO2 next message, GPIO3 nudge scroll
    let message_btn = Input::new(p.PIN_2, Pull::Up);
    let scroll_btn = Input::new(p.PIN_3, Pull::Up);

    // Heartbeat LED on the Pico's onboard pin
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner.spawn(serial_rx_task(rx)).unwrap();
    spawner.spawn(render_task(display)).unwrap();
    spawner
        .spawn(button_task(message_btn, ButtonEvent::NextMessage))
        .unwrap();
    spawner
        .spawn(button_task(scroll_btn, ButtonEvent::NudgeScroll))
        .unwrap();
    spawner.spawn(control_task()).unwrap();
    spawner.spawn(heartbeat_task(led)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Serial receive task - drains the UART and feeds the receiver.
///
/// The state lock is held while a batch is applied, so a frame never
/// renders in the middle of a drained batch.
#[embassy_executor::task]
async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut receiver = Receiver::new();
    let mut buf = [0u8; 64];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                let mut panel = PANEL.lock().await;
                receiver.feed_bytes(&buf[..n], &mut panel);
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Render task - one frame per tick, scroll advances per frame.
#[embassy_executor::task]
async fn render_task(mut display: Ssd1306<I2c<'static, i2c::Async>>) {
    info!("Render task started");

    let mut ticker = Ticker::every(Duration::from_millis(config::FRAME_MS));

    loop {
        ticker.next().await;

        display.clear_buffer();
        {
            let mut panel = PANEL.lock().await;
            panel.tick_scroll();
            // Drawing into the frame buffer cannot fail.
            let _ = layout::draw(&mut display, &panel);
        }

        if let Err(e) = display.flush().await {
            warn!("Display flush failed: {:?}", e);
        }
    }
}

/// Button task - one per button, reports debounced presses.
#[embassy_executor::task(pool_size = 2)]
async fn button_task(mut btn: Input<'static>, event: ButtonEvent) {
    info!("Button task started: {:?}", event);

    loop {
        button::wait_for_press(&mut btn).await;
        debug!("Button: {:?}", event);
        if BUTTON_EVENTS.try_send(event).is_err() {
            warn!("Button channel full, dropping event");
        }
    }
}

/// Control task - owns the message book; shows the first entry at boot
/// so the panel has demo content without a command source, then applies
/// button presses.
#[embassy_executor::task]
async fn control_task() {
    info!("Control task started");

    let mut book = MessageBook::new(MESSAGES);
    let mut receiver = Receiver::new();

    {
        let mut panel = PANEL.lock().await;
        book.show_next(&mut receiver, &mut panel);
    }

    loop {
        match BUTTON_EVENTS.receive().await {
            ButtonEvent::NextMessage => {
                let mut panel = PANEL.lock().await;
                book.show_next(&mut receiver, &mut panel);
            }
            ButtonEvent::NudgeScroll => {
                let mut panel = PANEL.lock().await;
                panel.nudge_scroll();
            }
        }
    }
}

/// Heartbeat task - a glance at the board shows the firmware is alive.
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(config::HEARTBEAT_MS));
    loop {
        ticker.next().await;
        led.toggle();
    }
}
