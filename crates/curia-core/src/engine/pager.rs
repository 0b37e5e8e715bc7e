//! Pagination over the filtered view.
//!
//! Pure functions of the view length, the page number, and the page size;
//! no hidden state.

use std::num::NonZeroUsize;

use crate::record::Record;

/// Total pages for a view of `len` records.
///
/// An empty view still has one (empty) page.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// The records visible on `page` (1-based), clipped to the available
/// elements. A page beyond the end yields an empty slice.
pub fn page_slice(records: &[Record], page: usize, page_size: NonZeroUsize) -> &[Record] {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size);
    if start >= records.len() {
        return &[];
    }
    let end = (start + size).min(records.len());
    &records[start..end]
}

/// Re-clamp a page number after the view shrank.
pub fn clamp(page: usize, total: usize) -> usize {
    page.clamp(1, total)
}
