//! tvpattern - Composite video test pattern generator
//!
//! Firmware for an RP2040 driving a TV through PicoVGA. Buttons step
//! through a fixed catalog of RLE test patterns and cycle the video mode.
//!
//! Core 1 runs the PicoVGA render loop. Core 0 runs the Embassy executor
//! with two tasks: the button sampler and the controller.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::multicore::{spawn_core1, Stack};
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use tvpattern_core::config::{MAX_IMAGE_BYTES, MAX_ROW_ENTRIES};
use tvpattern_core::control::{ControlLoop, Outputs};
use tvpattern_core::input::{Debouncer, InputLines};
use tvpattern_core::publish::{FramePublisher, ModeSwitcher, StagingBuffer};
use tvpattern_core::traits::IMAGE_LAYER;
use tvpattern_hal_rp2040::{IndicatorBank, InputBank, PinBank};

use crate::channels::SAMPLES;
use crate::patterns::{Aligned, PATTERNS};
use crate::video::picovga;

mod channels;
mod config;
mod patterns;
mod tasks;
mod video;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

static CORE1_STACK: ConstStaticCell<Stack<4096>> = ConstStaticCell::new(Stack::new());

// Staging copy of the image on screen; the video engine reads it from core 1
static STAGING_ROWS: ConstStaticCell<[u16; MAX_ROW_ENTRIES]> =
    ConstStaticCell::new([0; MAX_ROW_ENTRIES]);
static STAGING_DATA: ConstStaticCell<Aligned<[u8; MAX_IMAGE_BYTES]>> =
    ConstStaticCell::new(Aligned([0; MAX_IMAGE_BYTES]));

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("tvpattern firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let (mut pins, rest) = PinBank::new(p);
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);
    info!("Configuration loaded: {:?}", config);

    // Video lines belong to PicoVGA's PIO program
    unwrap!(pins.reserve(config.video.first, config.video.count));

    spawn_core1(rest.core1, CORE1_STACK.take(), move || picovga::run_core1());
    let Some((engine, layers, clock)) = picovga::take() else {
        defmt::panic!("PicoVGA handles already taken");
    };
    info!("Video core started");

    let inputs = unwrap!(InputBank::from_config(&mut pins, &config.board));
    let indicators = unwrap!(IndicatorBank::from_config(&mut pins, &config.board));

    // Idle level keeps the first window from reading as pressed
    let lines = InputLines::from_config(&config.board);
    SAMPLES.prime(lines.idle_level());
    let debouncer = Debouncer::new(&SAMPLES, lines);

    let staging = StagingBuffer::new(STAGING_ROWS.take(), &mut STAGING_DATA.take().0);
    let outputs = Outputs {
        publisher: FramePublisher::new(layers, staging, IMAGE_LAYER),
        switcher: ModeSwitcher::new(engine, clock),
        indicators,
    };

    let controller = unwrap!(ControlLoop::new(
        &config.board,
        debouncer,
        &PATTERNS,
        &video::MODES,
        outputs,
    ));
    info!(
        "Catalog: {} patterns, {} video modes",
        PATTERNS.len(),
        video::MODES.len()
    );

    spawner.spawn(unwrap!(tasks::sampler_task(
        inputs,
        config.board.sample_interval_us
    )));
    spawner.spawn(unwrap!(tasks::controller_task(controller)));

    info!("All tasks spawned, firmware running");
}
