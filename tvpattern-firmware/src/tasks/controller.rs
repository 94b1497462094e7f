//! Controller task
//!
//! Brings up video, then runs one control-loop iteration per sampler tick:
//! debounce, detect edges, move the cursors and publish.

use defmt::*;

use tvpattern_core::config::SAMPLE_COUNT;
use tvpattern_core::control::{ControlError, ControlLoop, Iteration};
use tvpattern_core::selection::Action;
use tvpattern_hal_rp2040::IndicatorBank;

use crate::channels::SAMPLE_TICK;
use crate::patterns::PATTERNS;
use crate::video::MODES;
use crate::video::picovga::{PicoClock, VgaEngine, VgaLayers};

/// Control loop wired to the PicoVGA outputs
pub type Controller =
    ControlLoop<'static, SAMPLE_COUNT, VgaLayers, VgaEngine, PicoClock, IndicatorBank>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut controller: Controller) {
    info!("Controller task started");

    match controller.start() {
        Ok(geometry) => info!(
            "Video up: {} at {}x{}, showing {}",
            controller.current_mode().name,
            geometry.width,
            geometry.height,
            controller.current_image().name
        ),
        // Keep sampling so a mode press can still recover the output
        Err(e) => error!("Video bring-up failed: {:?}", e),
    }

    loop {
        SAMPLE_TICK.wait().await;

        match controller.iterate() {
            Ok(iteration) => log_iteration(&iteration),
            Err(ControlError::ModeSwitch { cause, restored }) => {
                if restored {
                    warn!(
                        "Mode switch failed ({:?}), back on {}",
                        cause,
                        controller.current_mode().name
                    );
                } else {
                    error!("Mode switch failed ({:?}) and previous mode did not restore", cause);
                }
            }
            Err(ControlError::Publish(e)) => {
                error!("Publishing {} failed: {:?}", controller.current_image().name, e);
            }
        }
    }
}

fn log_iteration(iteration: &Iteration) {
    if iteration.actions.is_empty() {
        return;
    }

    debug!("Button state {:#010x}", iteration.state.bits());

    for action in &iteration.actions {
        match *action {
            Action::ShowImage(index) => info!("Image {}: {}", index, PATTERNS[index].name),
            Action::SwitchMode { to, .. } => info!("Mode {}: {}", to, MODES[to].name),
            Action::Indicator { line, on } => debug!("Indicator gpio{} -> {}", line, on),
        }
    }
}
