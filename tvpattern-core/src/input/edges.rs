//! Debounced button state and edge detection

use tvpattern_hal::gpio::BUS_WIDTH;

/// Debounced state of all monitored lines (bit set = pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState(u32);

impl ButtonState {
    /// Nothing pressed
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from raw pressed bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Pressed bits
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Check if a line is pressed
    pub fn is_pressed(&self, line: u8) -> bool {
        line < BUS_WIDTH && self.0 & (1 << line) != 0
    }
}

/// Transitions between two consecutive debounced states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edges {
    pressed: u32,
    released: u32,
}

impl Edges {
    /// Compare `previous` to `current`
    pub fn between(previous: ButtonState, current: ButtonState) -> Self {
        let changed = previous.0 ^ current.0;
        Self {
            pressed: changed & current.0,
            released: changed & !current.0,
        }
    }

    /// No line changed
    pub fn is_empty(&self) -> bool {
        self.pressed == 0 && self.released == 0
    }

    /// Line went from released to pressed
    pub fn pressed(&self, line: u8) -> bool {
        line < BUS_WIDTH && self.pressed & (1 << line) != 0
    }

    /// Line went from pressed to released
    pub fn released(&self, line: u8) -> bool {
        line < BUS_WIDTH && self.released & (1 << line) != 0
    }

    /// Bits of lines with a press edge
    pub fn pressed_bits(&self) -> u32 {
        self.pressed
    }

    /// Bits of lines with a release edge
    pub fn released_bits(&self) -> u32 {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change_no_edges() {
        let state = ButtonState::from_bits(1 << 26);
        let edges = Edges::between(state, state);
        assert!(edges.is_empty());
        assert!(!edges.pressed(26));
        assert!(!edges.released(26));
    }

    #[test]
    fn test_press_edge() {
        let edges = Edges::between(ButtonState::empty(), ButtonState::from_bits(1 << 26));
        assert!(edges.pressed(26));
        assert!(!edges.released(26));
        assert_eq!(edges.pressed_bits(), 1 << 26);
    }

    #[test]
    fn test_release_edge() {
        let edges = Edges::between(ButtonState::from_bits(1 << 27), ButtonState::empty());
        assert!(edges.released(27));
        assert!(!edges.pressed(27));
        assert_eq!(edges.released_bits(), 1 << 27);
    }

    #[test]
    fn test_simultaneous_press_and_release() {
        let edges = Edges::between(
            ButtonState::from_bits(1 << 27),
            ButtonState::from_bits(1 << 26),
        );
        assert!(edges.pressed(26));
        assert!(edges.released(27));
    }

    #[test]
    fn test_held_line_has_no_edge() {
        let edges = Edges::between(
            ButtonState::from_bits(1 << 26),
            ButtonState::from_bits((1 << 26) | (1 << 27)),
        );
        assert!(!edges.pressed(26));
        assert!(edges.pressed(27));
    }

    #[test]
    fn test_out_of_range_line() {
        let state = ButtonState::from_bits(u32::MAX);
        assert!(!state.is_pressed(32));
    }
}
