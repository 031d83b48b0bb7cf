//! Page slicing for the show list

/// One page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// 1-based page number that was requested
    pub page: usize,
    /// Total number of pages (at least 1)
    pub total_pages: usize,
    /// Number of items across all pages
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page numbers for the numbered page control
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// Whether a page control is worth showing
    pub fn needs_controls(&self) -> bool {
        self.total_pages > 1
    }
}

/// Number of pages needed for `len` items, never less than 1
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Slice out page `page` (1-based) of `items`
///
/// Pages past the end, and page 0, come back empty. A page size of 0 is
/// treated as 1.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let total = total_pages(items.len(), size);

    let slice = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size);
            if start >= items.len() {
                &items[0..0]
            } else {
                let end = start.saturating_add(size).min(items.len());
                &items[start..end]
            }
        }
        None => &items[0..0],
    };

    Page {
        items: slice,
        page,
        total_pages: total,
        total_items: items.len(),
    }
}
