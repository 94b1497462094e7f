//! RAM staging area for the active image
//!
//! Flash is too slow for the video engine to stream from, so the selected
//! image is copied into RAM first.

use crate::catalog::ImageDescriptor;

/// Borrowed RAM buffers the image layer reads from
pub struct StagingBuffer<'a> {
    rows: &'a mut [u16],
    data: &'a mut [u8],
}

impl<'a> StagingBuffer<'a> {
    pub fn new(rows: &'a mut [u16], data: &'a mut [u8]) -> Self {
        Self { rows, data }
    }

    /// Row table capacity in entries
    pub fn row_capacity(&self) -> usize {
        self.rows.len()
    }

    /// Pixel data capacity in bytes
    pub fn data_capacity(&self) -> usize {
        self.data.len()
    }

    /// Check an image can be staged
    pub fn fits(&self, image: &ImageDescriptor) -> bool {
        image.has_row_table()
            && image.row_entries() <= self.rows.len()
            && image.byte_size() <= self.data.len()
    }

    /// Copy an image in and return the staged data and row table
    ///
    /// Returns `None` if the image does not fit.
    pub fn load(&mut self, image: &ImageDescriptor) -> Option<(&[u8], &[u16])> {
        if !self.fits(image) {
            return None;
        }

        let rows = image.used_rows();
        self.rows[..rows.len()].copy_from_slice(rows);
        self.data[..image.byte_size()].copy_from_slice(image.data);

        Some((&self.data[..image.byte_size()], &self.rows[..rows.len()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: [u16; 4] = [0, 2, 4, 6];
    const DATA: [u8; 6] = [1, 2, 3, 4, 5, 6];

    const IMAGE: ImageDescriptor = ImageDescriptor {
        name: "test",
        width: 8,
        height: 2,
        rows: &ROWS,
        data: &DATA,
    };

    #[test]
    fn test_load_copies_height_plus_one_rows() {
        let mut rows = [0xFFFFu16; 8];
        let mut data = [0u8; 16];
        let mut staging = StagingBuffer::new(&mut rows, &mut data);

        let (staged_data, staged_rows) = staging.load(&IMAGE).unwrap();
        assert_eq!(staged_data, &DATA);
        assert_eq!(staged_rows, &[0, 2, 4]);

        drop(staging);
        // Entries past height + 1 untouched
        assert_eq!(rows[3], 0xFFFF);
    }

    #[test]
    fn test_oversized_image_rejected() {
        let mut rows = [0u16; 8];
        let mut data = [0u8; 4];
        let mut staging = StagingBuffer::new(&mut rows, &mut data);
        assert!(!staging.fits(&IMAGE));
        assert!(staging.load(&IMAGE).is_none());
        assert_eq!(staging.data_capacity(), 4);
        assert_eq!(staging.row_capacity(), 8);
    }
}
