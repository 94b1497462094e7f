//! Selection controller
//!
//! A single idle state with edge-triggered actions. Each iteration compares
//! the new debounced state with the one seen last time and handles the
//! buttons in a fixed order: next, previous, mode. Two edges arriving in the
//! same iteration therefore always resolve the same way.

use core::num::NonZeroUsize;

use heapless::Vec;

use super::cursor::Cursor;
use crate::config::{BoardConfig, ButtonConfig, ReleasePolicy};
use crate::input::{ButtonState, Edges};

/// Logical buttons, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Next,
    Previous,
    Mode,
}

/// A button bound to an input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBinding {
    pub button: Button,
    /// Input line (bit index in the debounced state)
    pub line: u8,
    /// Indicator output driven by this button
    pub indicator: Option<u8>,
}

impl ButtonBinding {
    fn from_config(button: Button, config: &ButtonConfig) -> Self {
        Self {
            button,
            line: config.input.pin,
            indicator: config.indicator,
        }
    }
}

/// Something the caller must do as a result of an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Publish the image at this catalog index
    ShowImage(usize),
    /// Switch video mode; `from` is the mode to fall back to on failure
    SwitchMode { from: usize, to: usize },
    /// Drive an indicator output
    Indicator { line: u8, on: bool },
}

/// Upper bound on actions per iteration: one cursor action and one
/// indicator change per button
pub const MAX_ACTIONS: usize = 6;

/// Actions produced by one iteration, in execution order
pub type Actions = Vec<Action, MAX_ACTIONS>;

/// Edge-driven selection state machine
#[derive(Debug, Clone)]
pub struct SelectionController {
    /// Debounced state seen on the previous iteration
    previous: ButtonState,
    image: Cursor,
    mode: Cursor,
    bindings: Vec<ButtonBinding, 3>,
    policy: ReleasePolicy,
}

impl SelectionController {
    /// Create a controller for catalogs of the given sizes
    ///
    /// The image cursor starts at 0. The mode cursor starts at the board's
    /// default mode, or 0 if that is out of range.
    pub fn new(config: &BoardConfig, images: NonZeroUsize, modes: NonZeroUsize) -> Self {
        let mut bindings = Vec::new();
        let _ = bindings.push(ButtonBinding::from_config(Button::Next, &config.next));
        let _ = bindings.push(ButtonBinding::from_config(Button::Previous, &config.prev));
        if let Some(mode) = &config.mode {
            let _ = bindings.push(ButtonBinding::from_config(Button::Mode, mode));
        }

        Self {
            previous: ButtonState::empty(),
            image: Cursor::new(images),
            mode: Cursor::at(config.default_mode as usize, modes)
                .unwrap_or(Cursor::new(modes)),
            bindings,
            policy: config.release_policy,
        }
    }

    /// Process one debounced state
    ///
    /// Returns nothing when the state is unchanged.
    pub fn step(&mut self, current: ButtonState) -> Actions {
        let edges = Edges::between(self.previous, current);
        self.previous = current;

        let mut actions = Actions::new();
        if edges.is_empty() {
            return actions;
        }

        for binding in &self.bindings {
            if edges.pressed(binding.line) {
                let action = match binding.button {
                    Button::Next => Some(Action::ShowImage(self.image.advance())),
                    Button::Previous => Some(Action::ShowImage(self.image.retreat())),
                    Button::Mode => {
                        let from = self.mode.index();
                        let to = self.mode.advance();
                        (from != to).then_some(Action::SwitchMode { from, to })
                    }
                };
                if let Some(action) = action {
                    let _ = actions.push(action);
                }
                if let Some(line) = binding.indicator {
                    let _ = actions.push(Action::Indicator { line, on: true });
                }
            } else if edges.released(binding.line) {
                if let (ReleasePolicy::MirrorIndicator, Some(line)) =
                    (self.policy, binding.indicator)
                {
                    let _ = actions.push(Action::Indicator { line, on: false });
                }
            }
        }

        actions
    }

    /// Put the mode cursor back after a failed switch
    pub fn revert_mode(&mut self, index: usize) {
        if let Some(cursor) = Cursor::at(index, self.mode.len()) {
            self.mode = cursor;
        }
    }

    /// Active image index
    pub fn image_index(&self) -> usize {
        self.image.index()
    }

    /// Active video mode index
    pub fn mode_index(&self) -> usize {
        self.mode.index()
    }

    /// Debounced state from the last iteration
    pub fn previous_state(&self) -> ButtonState {
        self.previous
    }

    /// Configured buttons in processing order
    pub fn bindings(&self) -> &[ButtonBinding] {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinConfig;

    const NEXT: u32 = 1 << 26;
    const PREV: u32 = 1 << 27;
    const MODE: u32 = 1 << 22;

    fn n(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).unwrap()
    }

    fn controller(images: usize) -> SelectionController {
        SelectionController::new(&BoardConfig::default(), n(images), n(1))
    }

    fn press(ctrl: &mut SelectionController, bits: u32) -> Actions {
        let actions = ctrl.step(ButtonState::from_bits(bits));
        ctrl.step(ButtonState::empty());
        actions
    }

    #[test]
    fn test_next_wraps_through_catalog() {
        let mut ctrl = controller(4);
        let shown: [usize; 4] = core::array::from_fn(|_| match press(&mut ctrl, NEXT)[0] {
            Action::ShowImage(index) => index,
            other => panic!("unexpected {:?}", other),
        });
        assert_eq!(shown, [1, 2, 3, 0]);
    }

    #[test]
    fn test_previous_at_zero_wraps_to_last() {
        let mut ctrl = controller(4);
        assert_eq!(press(&mut ctrl, PREV).as_slice(), &[Action::ShowImage(3)]);
        assert_eq!(ctrl.image_index(), 3);
    }

    #[test]
    fn test_unchanged_state_does_nothing() {
        let mut ctrl = controller(4);
        assert!(ctrl.step(ButtonState::empty()).is_empty());

        // Holding a button only acts once
        assert_eq!(ctrl.step(ButtonState::from_bits(NEXT)).len(), 1);
        assert!(ctrl.step(ButtonState::from_bits(NEXT)).is_empty());
        assert_eq!(ctrl.image_index(), 1);
    }

    #[test]
    fn test_release_ignored_by_default() {
        let mut ctrl = controller(4);
        ctrl.step(ButtonState::from_bits(NEXT));
        assert!(ctrl.step(ButtonState::empty()).is_empty());
        assert_eq!(ctrl.image_index(), 1);
    }

    #[test]
    fn test_simultaneous_next_and_previous() {
        let mut ctrl = controller(4);
        let actions = ctrl.step(ButtonState::from_bits(NEXT | PREV));
        assert_eq!(
            actions.as_slice(),
            &[Action::ShowImage(1), Action::ShowImage(0)]
        );
        assert_eq!(ctrl.image_index(), 0);
    }

    #[test]
    fn test_indicator_mirrors_button() {
        let config = BoardConfig {
            prev: ButtonConfig::new(PinConfig::button(27)).with_indicator(17),
            release_policy: ReleasePolicy::MirrorIndicator,
            ..Default::default()
        };
        let mut ctrl = SelectionController::new(&config, n(2), n(1));

        assert_eq!(
            ctrl.step(ButtonState::from_bits(PREV)).as_slice(),
            &[Action::ShowImage(1), Action::Indicator { line: 17, on: true }]
        );
        assert_eq!(
            ctrl.step(ButtonState::empty()).as_slice(),
            &[Action::Indicator { line: 17, on: false }]
        );
    }

    #[test]
    fn test_indicator_latches_when_release_ignored() {
        let config = BoardConfig {
            prev: ButtonConfig::new(PinConfig::button(27)).with_indicator(17),
            ..Default::default()
        };
        let mut ctrl = SelectionController::new(&config, n(2), n(1));

        assert_eq!(ctrl.step(ButtonState::from_bits(PREV)).len(), 2);
        assert!(ctrl.step(ButtonState::empty()).is_empty());
    }

    #[test]
    fn test_mode_button_cycles_modes() {
        let config = BoardConfig {
            mode: Some(ButtonConfig::new(PinConfig::button(22))),
            ..Default::default()
        };
        let mut ctrl = SelectionController::new(&config, n(2), n(3));
        assert_eq!(ctrl.bindings().len(), 3);

        assert_eq!(
            press(&mut ctrl, MODE).as_slice(),
            &[Action::SwitchMode { from: 0, to: 1 }]
        );
        press(&mut ctrl, MODE);
        assert_eq!(
            press(&mut ctrl, MODE).as_slice(),
            &[Action::SwitchMode { from: 2, to: 0 }]
        );
    }

    #[test]
    fn test_mode_button_with_single_mode_is_noop() {
        let config = BoardConfig {
            mode: Some(ButtonConfig::new(PinConfig::button(22))),
            ..Default::default()
        };
        let mut ctrl = SelectionController::new(&config, n(2), n(1));
        assert!(press(&mut ctrl, MODE).is_empty());
    }

    #[test]
    fn test_edges_processed_next_previous_mode() {
        let config = BoardConfig {
            mode: Some(ButtonConfig::new(PinConfig::button(22))),
            ..Default::default()
        };
        let mut ctrl = SelectionController::new(&config, n(3), n(2));
        let actions = ctrl.step(ButtonState::from_bits(MODE | PREV | NEXT));
        assert_eq!(
            actions.as_slice(),
            &[
                Action::ShowImage(1),
                Action::ShowImage(0),
                Action::SwitchMode { from: 0, to: 1 },
            ]
        );
    }

    #[test]
    fn test_revert_mode() {
        let config = BoardConfig {
            mode: Some(ButtonConfig::new(PinConfig::button(22))),
            ..Default::default()
        };
        let mut ctrl = SelectionController::new(&config, n(1), n(2));
        press(&mut ctrl, MODE);
        assert_eq!(ctrl.mode_index(), 1);
        ctrl.revert_mode(0);
        assert_eq!(ctrl.mode_index(), 0);
        ctrl.revert_mode(9);
        assert_eq!(ctrl.mode_index(), 0);
    }

    #[test]
    fn test_default_mode_out_of_range_falls_back() {
        let config = BoardConfig {
            default_mode: 5,
            ..Default::default()
        };
        let ctrl = SelectionController::new(&config, n(1), n(2));
        assert_eq!(ctrl.mode_index(), 0);
    }
}
