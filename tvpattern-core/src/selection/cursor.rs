//! Wrapping catalog cursor

use core::num::NonZeroUsize;

/// Position in a non-empty catalog
///
/// Always satisfies `index < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: NonZeroUsize,
}

impl Cursor {
    /// Cursor at the first entry
    pub const fn new(len: NonZeroUsize) -> Self {
        Self { index: 0, len }
    }

    /// Cursor at `index`, if it is in range
    pub fn at(index: usize, len: NonZeroUsize) -> Option<Self> {
        (index < len.get()).then_some(Self { index, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> NonZeroUsize {
        self.len
    }

    /// Move forward, wrapping from the last entry to the first
    pub fn advance(&mut self) -> usize {
        self.index += 1;
        if self.index >= self.len.get() {
            self.index = 0;
        }
        self.index
    }

    /// Move back, wrapping from the first entry to the last
    pub fn retreat(&mut self) -> usize {
        self.index = match self.index {
            0 => self.len.get() - 1,
            i => i - 1,
        };
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_advance_wraps() {
        let mut cursor = Cursor::new(len(4));
        assert_eq!(cursor.advance(), 1);
        assert_eq!(cursor.advance(), 2);
        assert_eq!(cursor.advance(), 3);
        assert_eq!(cursor.advance(), 0);
    }

    #[test]
    fn test_retreat_wraps() {
        let mut cursor = Cursor::new(len(4));
        assert_eq!(cursor.retreat(), 3);
        assert_eq!(cursor.retreat(), 2);
    }

    #[test]
    fn test_single_entry_stays_put() {
        let mut cursor = Cursor::new(len(1));
        assert_eq!(cursor.advance(), 0);
        assert_eq!(cursor.retreat(), 0);
    }

    #[test]
    fn test_at_checks_range() {
        assert_eq!(Cursor::at(2, len(3)).map(|c| c.index()), Some(2));
        assert!(Cursor::at(3, len(3)).is_none());
    }
}
