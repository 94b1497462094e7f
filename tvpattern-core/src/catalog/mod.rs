//! Build-time catalogs of images and video modes
//!
//! Catalogs are ordered, immutable and never empty. Emptiness is rejected
//! when the catalog is built, so selection cursors can always index into
//! them.

pub mod image;
pub mod mode;

pub use image::ImageDescriptor;
pub use mode::{AspectRatio, VideoMode};

use core::num::NonZeroUsize;

/// Catalog construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// Catalog has no entries
    Empty,
    /// Image data or row table does not fit the staging buffer
    ImageTooLarge {
        /// Catalog position of the offending image
        index: usize,
    },
    /// Row table is shorter than `height + 1` entries
    RowTableTooShort {
        /// Catalog position of the offending image
        index: usize,
    },
}

/// Ordered, non-empty sequence of descriptors
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a, T> {
    items: &'a [T],
}

impl<'a, T> Catalog<'a, T> {
    /// Wrap a slice of descriptors
    pub fn new(items: &'a [T]) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { items })
    }

    /// Number of entries
    pub fn len(&self) -> NonZeroUsize {
        // Checked in `new`
        NonZeroUsize::new(self.items.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Entry at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Cursors built from [`len`](Self::len)
    /// never produce such an index.
    pub fn get(&self, index: usize) -> &'a T {
        &self.items[index]
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.items.iter()
    }
}

impl<'a> Catalog<'a, ImageDescriptor> {
    /// Check every image against the staging capacities
    pub fn check_fits(&self, max_rows: usize, max_bytes: usize) -> Result<(), CatalogError> {
        for (index, image) in self.items.iter().enumerate() {
            if !image.has_row_table() {
                return Err(CatalogError::RowTableTooShort { index });
            }
            if image.row_entries() > max_rows || image.byte_size() > max_bytes {
                return Err(CatalogError::ImageTooLarge { index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: [u16; 3] = [0, 4, 8];
    const DATA: [u8; 8] = [0; 8];

    const SMALL: ImageDescriptor = ImageDescriptor {
        name: "small",
        width: 4,
        height: 2,
        rows: &ROWS,
        data: &DATA,
    };

    #[test]
    fn test_empty_catalog_rejected() {
        let items: [u8; 0] = [];
        assert_eq!(Catalog::new(&items).err(), Some(CatalogError::Empty));
    }

    #[test]
    fn test_len_and_get() {
        let items = ['a', 'b', 'c'];
        let catalog = Catalog::new(&items).unwrap();
        assert_eq!(catalog.len().get(), 3);
        assert_eq!(*catalog.get(2), 'c');
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        let items = [1u8];
        let catalog = Catalog::new(&items).unwrap();
        let _ = catalog.get(1);
    }

    #[test]
    fn test_check_fits() {
        let images = [SMALL, SMALL];
        let catalog = Catalog::new(&images).unwrap();
        assert_eq!(catalog.check_fits(3, 8), Ok(()));
        assert_eq!(
            catalog.check_fits(3, 7),
            Err(CatalogError::ImageTooLarge { index: 0 })
        );
        assert_eq!(
            catalog.check_fits(2, 8),
            Err(CatalogError::ImageTooLarge { index: 0 })
        );
    }

    #[test]
    fn test_short_row_table_rejected() {
        static SHORT: [u16; 2] = [0, 4];
        let broken = ImageDescriptor {
            rows: &SHORT,
            ..SMALL
        };
        let images = [SMALL, broken];
        let catalog = Catalog::new(&images).unwrap();
        assert_eq!(
            catalog.check_fits(100, 100),
            Err(CatalogError::RowTableTooShort { index: 1 })
        );
    }
}
