//! PicoVGA binding
//!
//! PicoVGA is a C++ library, so the firmware links a thin C-ABI glue
//! library (`libpicovga_glue.a`, located through `PICOVGA_LIB_DIR`) that
//! forwards to it:
//!
//! | Glue function            | PicoVGA / SDK call                          |
//! |--------------------------|---------------------------------------------|
//! | `tvp_vga_core`           | `VgaCore()` (core 1 entry, never returns)   |
//! | `tvp_vga_configure`      | `VgaCfgDef` + `VgaCfg`, layer 1 in RLE mode, layer 0 filled with a solid colour |
//! | `tvp_vga_start`          | `VgaInitReq(&Vmode)`                        |
//! | `tvp_vga_stop`           | `VgaInitReq(NULL)`                          |
//! | `tvp_layer_setup`        | `LayerSetup(layer, img, &Vmode, w, h, 0, rows)` |
//! | `tvp_layer_on/off`       | `LayerOn` / `LayerOff`                      |
//! | `tvp_clock_get_khz`      | `clock_get_hz(clk_sys) / 1000`              |
//! | `tvp_set_sys_clock_pll`  | `set_sys_clock_pll(vco, pd1, pd2)`          |
//!
//! The safe wrappers below are handed out once by [`take`] and implement
//! the core collaborator traits.

use portable_atomic::{AtomicBool, Ordering};
use tvpattern_core::catalog::VideoMode;
use tvpattern_core::traits::{
    Geometry, LayerCompositor, LayerGeometry, LayerId, VideoError, VideoGenerator,
};
use tvpattern_hal::{ClockError, PllConfig, SystemClock};

/// Timing tables built into PicoVGA
///
/// The discriminant is the table index the glue library expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
#[repr(u8)]
pub enum Timing {
    /// `VideoNTSCp`
    NtscProgressive = 0,
    /// `VideoNTSC`
    NtscInterlaced = 1,
    /// `VideoPALp`
    PalProgressive = 2,
    /// `VideoPAL`
    PalInterlaced = 3,
    /// `VideoVGA` (640x480)
    Vga = 4,
}

/// Mode setup computed by the glue, mirrors the fields of `sVmode` we need
#[repr(C)]
#[derive(Default)]
struct VmodeInfo {
    width: u16,
    height: u16,
    /// System clock in kHz
    freq: u32,
    /// PLL VCO in kHz
    vco: u32,
    pd1: u8,
    pd2: u8,
}

extern "C" {
    fn tvp_vga_core() -> !;
    fn tvp_vga_configure(
        timing: u8,
        width: u16,
        height: u16,
        full_width: u16,
        double_y: bool,
        out: *mut VmodeInfo,
    ) -> bool;
    fn tvp_vga_start() -> bool;
    fn tvp_vga_stop();
    fn tvp_layer_setup(layer: u8, img: *const u8, width: u16, height: u16, rows: *const u16);
    fn tvp_layer_on(layer: u8);
    fn tvp_layer_off(layer: u8);
    fn tvp_clock_get_khz() -> u32;
    fn tvp_set_sys_clock_pll(vco_hz: u32, pd1: u8, pd2: u8) -> bool;
}

/// Core 1 entry point
pub fn run_core1() -> ! {
    // SAFETY: called exactly once, on core 1
    unsafe { tvp_vga_core() }
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Handles to the video engine, its compositor and the system clock
///
/// Returns `None` after the first call.
pub fn take() -> Option<(VgaEngine, VgaLayers, PicoClock)> {
    if TAKEN.swap(true, Ordering::AcqRel) {
        return None;
    }
    Some((VgaEngine { _private: () }, VgaLayers { _private: () }, PicoClock { _private: () }))
}

/// Video generation on core 1
pub struct VgaEngine {
    _private: (),
}

impl VideoGenerator for VgaEngine {
    type Timing = Timing;

    fn stop(&mut self) {
        // SAFETY: plain request to core 1, no pointers
        unsafe { tvp_vga_stop() }
    }

    fn configure(&mut self, mode: &VideoMode<Timing>) -> Result<Geometry, VideoError> {
        let mut info = VmodeInfo::default();
        // SAFETY: `info` outlives the call and is only written by it
        let ok = unsafe {
            tvp_vga_configure(
                mode.timing as u8,
                mode.width,
                mode.height,
                mode.full_width,
                mode.double_y,
                &mut info,
            )
        };
        if !ok {
            return Err(VideoError::UnsupportedMode);
        }

        Ok(Geometry {
            width: info.width,
            height: info.height,
            pll: PllConfig {
                sys_khz: info.freq,
                vco_khz: info.vco,
                post_div1: info.pd1,
                post_div2: info.pd2,
            },
        })
    }

    fn start(&mut self, _geometry: &Geometry) -> Result<(), VideoError> {
        // SAFETY: the glue starts the mode computed by the last configure
        if unsafe { tvp_vga_start() } {
            Ok(())
        } else {
            Err(VideoError::NotResponding)
        }
    }
}

/// PicoVGA layer compositor
pub struct VgaLayers {
    _private: (),
}

impl LayerCompositor for VgaLayers {
    fn set_layer_enabled(&mut self, layer: LayerId, enabled: bool) {
        // SAFETY: plain register update in the library
        unsafe {
            if enabled {
                tvp_layer_on(layer.0)
            } else {
                tvp_layer_off(layer.0)
            }
        }
    }

    fn configure_layer(
        &mut self,
        layer: LayerId,
        data: &[u8],
        rows: &[u16],
        geometry: LayerGeometry,
    ) {
        // SAFETY: the buffers are the static staging area; the frame
        // publisher keeps them unchanged while the layer is enabled
        unsafe {
            tvp_layer_setup(
                layer.0,
                data.as_ptr(),
                geometry.width,
                geometry.height,
                rows.as_ptr(),
            )
        }
    }
}

/// RP2040 system clock, reprogrammed through the Pico SDK
pub struct PicoClock {
    _private: (),
}

impl SystemClock for PicoClock {
    fn frequency_khz(&self) -> u32 {
        // SAFETY: reads clock registers only
        unsafe { tvp_clock_get_khz() }
    }

    fn apply_pll(&mut self, pll: &PllConfig) -> Result<(), ClockError> {
        let vco_hz = pll
            .vco_khz
            .checked_mul(1000)
            .ok_or(ClockError::Unattainable)?;
        // SAFETY: video is stopped while the clock changes
        if unsafe { tvp_set_sys_clock_pll(vco_hz, pll.post_div1, pll.post_div2) } {
            Ok(())
        } else {
            Err(ClockError::Unattainable)
        }
    }
}
