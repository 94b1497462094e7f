//! Button sampler task
//!
//! Snapshots the button bus at a fixed interval, pushes the snapshot into
//! the shared sample buffer and wakes the controller.

use defmt::*;
use embassy_time::{Duration, Ticker};

use tvpattern_core::config::SAMPLE_COUNT;
use tvpattern_core::input::Sampler;
use tvpattern_hal_rp2040::InputBank;

use crate::channels::{SAMPLES, SAMPLE_TICK};

/// Sampler task - one bus snapshot per tick
#[embassy_executor::task]
pub async fn sampler_task(bus: InputBank, interval_us: u32) {
    info!(
        "Sampler task started: {} us interval, {} sample window",
        interval_us, SAMPLE_COUNT
    );

    let mut sampler: Sampler<'static, InputBank, SAMPLE_COUNT> = Sampler::new(bus, &SAMPLES);
    let mut ticker = Ticker::every(Duration::from_micros(interval_us as u64));
    let mut reported_stale = 0;

    loop {
        ticker.next().await;

        if sampler.tick().is_break() {
            warn!("Sampler stopped");
            return;
        }

        let stale = sampler.stale_reads();
        if stale != reported_stale {
            warn!("Button bus read failed, reusing previous sample ({} total)", stale);
            reported_stale = stale;
        }

        SAMPLE_TICK.signal(());
    }
}
