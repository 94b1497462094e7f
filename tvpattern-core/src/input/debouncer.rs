//! Consensus debouncing
//!
//! A line is reported pressed only if every sample in the window shows it
//! pressed; a single released sample anywhere in the window reports it
//! released. Presses are therefore confirmed slowly and releases are seen
//! quickly.

use super::edges::ButtonState;
use super::lines::InputLines;
use super::sampler::SampleBuffer;

/// Reduce a window of raw snapshots to a stable button state
///
/// Starts from "everything asserted" and clears each line that is not
/// asserted in some snapshot. The result is masked to the monitored lines.
pub fn debounce<I>(samples: I, lines: &InputLines) -> ButtonState
where
    I: IntoIterator<Item = u32>,
{
    let stable = samples
        .into_iter()
        .fold(u32::MAX, |acc, raw| acc & lines.asserted(raw));

    ButtonState::from_bits(stable & lines.mask())
}

/// Debouncer reading a shared sample buffer
///
/// Holds no state of its own; every call recomputes from the buffer.
pub struct Debouncer<'a, const N: usize> {
    buffer: &'a SampleBuffer<N>,
    lines: InputLines,
}

impl<'a, const N: usize> Debouncer<'a, N> {
    /// Create a debouncer over `buffer` for the given lines
    pub fn new(buffer: &'a SampleBuffer<N>, lines: InputLines) -> Self {
        Self { buffer, lines }
    }

    /// Compute the current stable state
    pub fn stable_state(&self) -> ButtonState {
        debounce(self.buffer.iter(), &self.lines)
    }

    /// Monitored lines
    pub fn lines(&self) -> &InputLines {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvpattern_hal::Polarity;

    const NEXT: u8 = 26;
    const PREV: u8 = 27;

    fn lines() -> InputLines {
        InputLines::new()
            .with_line(NEXT, Polarity::ActiveLow)
            .with_line(PREV, Polarity::ActiveLow)
    }

    /// Raw snapshot with the given lines held low (pressed)
    fn held(pressed: &[u8]) -> u32 {
        pressed.iter().fold(u32::MAX, |raw, line| raw & !(1 << line))
    }

    #[test]
    fn test_unanimous_press_reported() {
        let window = [held(&[NEXT]); 10];
        let state = debounce(window, &lines());
        assert!(state.is_pressed(NEXT));
        assert!(!state.is_pressed(PREV));
    }

    #[test]
    fn test_single_dissent_reports_released() {
        let p = held(&[NEXT]);
        let r = held(&[]);
        let window = [p, p, r, p, p, p, p, p, p, p];
        assert!(!debounce(window, &lines()).is_pressed(NEXT));
    }

    #[test]
    fn test_unused_lines_never_pressed() {
        // All lines low, including unmonitored ones
        let window = [0u32; 10];
        let state = debounce(window, &lines());
        assert_eq!(state.bits(), (1 << NEXT) | (1 << PREV));
    }

    #[test]
    fn test_buffer_backed_debouncer() {
        let buffer: SampleBuffer<10> = SampleBuffer::new();
        let lines = lines();
        buffer.prime(lines.idle_level());

        let debouncer = Debouncer::new(&buffer, lines);
        assert_eq!(debouncer.stable_state(), ButtonState::empty());

        // Nine pressed samples are not enough
        for _ in 0..9 {
            buffer.push(held(&[PREV]));
        }
        assert!(!debouncer.stable_state().is_pressed(PREV));

        buffer.push(held(&[PREV]));
        assert!(debouncer.stable_state().is_pressed(PREV));

        // One release sample clears it immediately
        buffer.push(held(&[]));
        assert!(!debouncer.stable_state().is_pressed(PREV));
    }
}
