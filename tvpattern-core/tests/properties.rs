//! Property-based tests using proptest
//!
//! Debounce consensus, edge detection and cursor wraparound must hold for
//! arbitrary inputs, not just the hand-picked scenarios.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use tvpattern_core::config::{BoardConfig, SAMPLE_COUNT};
use tvpattern_core::input::{debounce, ButtonState, Edges, InputLines};
use tvpattern_core::selection::{Cursor, SelectionController};
use tvpattern_hal::Polarity;

const LINE: u8 = 26;

fn cursor_strategy() -> impl Strategy<Value = Cursor> {
    (1usize..64).prop_flat_map(|len| {
        let len = NonZeroUsize::new(len).unwrap();
        (0..len.get()).prop_map(move |index| Cursor::at(index, len).unwrap())
    })
}

proptest! {
    // Property: a line is pressed exactly when every sample agrees
    #[test]
    fn test_pressed_iff_unanimous(
        window in prop::collection::vec(any::<bool>(), SAMPLE_COUNT),
        noise in prop::collection::vec(any::<u32>(), SAMPLE_COUNT),
    ) {
        let lines = InputLines::new().with_line(LINE, Polarity::ActiveLow);
        let samples = window.iter().zip(&noise).map(|(&pressed, &raw)| {
            if pressed { raw & !(1 << LINE) } else { raw | (1 << LINE) }
        });

        let state = debounce(samples, &lines);
        prop_assert_eq!(state.is_pressed(LINE), window.iter().all(|&p| p));
        // Noise on unmonitored lines never leaks through
        prop_assert_eq!(state.bits() & !(1 << LINE), 0);
    }

    // Property: press and release edges partition the changed lines
    #[test]
    fn test_edges_partition_changes(previous in any::<u32>(), current in any::<u32>()) {
        let edges = Edges::between(
            ButtonState::from_bits(previous),
            ButtonState::from_bits(current),
        );
        prop_assert_eq!(edges.pressed_bits() & edges.released_bits(), 0);
        prop_assert_eq!(edges.pressed_bits() | edges.released_bits(), previous ^ current);
        prop_assert_eq!(edges.pressed_bits() & !current, 0);
        prop_assert_eq!(edges.released_bits() & current, 0);
    }

    // Property: len forward steps return to the start
    #[test]
    fn test_full_cycle_returns_to_start(cursor in cursor_strategy()) {
        let mut moved = cursor;
        for _ in 0..cursor.len().get() {
            moved.advance();
        }
        prop_assert_eq!(moved, cursor);
    }

    // Property: retreat undoes advance
    #[test]
    fn test_retreat_inverts_advance(cursor in cursor_strategy(), steps in 0usize..128) {
        let mut moved = cursor;
        for _ in 0..steps {
            moved.advance();
        }
        for _ in 0..steps {
            moved.retreat();
        }
        prop_assert_eq!(moved, cursor);
    }

    // Property: any walk stays inside the catalog
    #[test]
    fn test_cursor_stays_in_range(
        cursor in cursor_strategy(),
        walk in prop::collection::vec(any::<bool>(), 0..128),
    ) {
        let mut moved = cursor;
        for forward in walk {
            let index = if forward { moved.advance() } else { moved.retreat() };
            prop_assert!(index < moved.len().get());
        }
    }

    // Property: repeating a debounced state never produces actions
    #[test]
    fn test_repeated_state_is_idle(bits in any::<u32>(), images in 1usize..16) {
        let mut ctrl = SelectionController::new(
            &BoardConfig::default(),
            NonZeroUsize::new(images).unwrap(),
            NonZeroUsize::MIN,
        );
        let state = ButtonState::from_bits(bits);
        ctrl.step(state);
        let index = ctrl.image_index();

        prop_assert!(ctrl.step(state).is_empty());
        prop_assert_eq!(ctrl.image_index(), index);
    }
}
