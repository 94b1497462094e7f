//! Image descriptors

/// A pre-rendered, run-length-encoded test pattern
///
/// The pixel data is opaque to this crate; only the display layer decodes
/// it. `rows` holds the byte offset of each line in `data`, followed by a
/// terminating offset, so it has `height + 1` meaningful entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Display name used in logs
    pub name: &'static str,
    /// Width in pixels
    pub width: u16,
    /// Height in lines
    pub height: u16,
    /// Row offset table
    pub rows: &'static [u16],
    /// RLE pixel data
    pub data: &'static [u8],
}

impl ImageDescriptor {
    /// Size of the pixel data in bytes
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Row table entries needed to display the image
    pub fn row_entries(&self) -> usize {
        self.height as usize + 1
    }

    /// Check the row table covers every line plus the terminator
    pub fn has_row_table(&self) -> bool {
        self.rows.len() >= self.row_entries()
    }

    /// Row table entries actually used
    pub fn used_rows(&self) -> &'static [u16] {
        let end = self.row_entries().min(self.rows.len());
        &self.rows[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_entries_include_terminator() {
        let image = ImageDescriptor {
            name: "bars",
            width: 320,
            height: 224,
            rows: &[0; 241],
            data: &[0; 16],
        };
        assert_eq!(image.row_entries(), 225);
        assert!(image.has_row_table());
        assert_eq!(image.used_rows().len(), 225);
        assert_eq!(image.byte_size(), 16);
    }
}
