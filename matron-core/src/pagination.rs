//! Client-side pagination over an already-fetched, already-filtered row set.

/// Page arithmetic for a fixed page size. Pages are 1-based.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    total_items: usize,
    page_size: usize,
}

impl Paginator {
    /// A zero `page_size` is coerced to 1.
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
        }
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total_items / page_size)`; 0 for an empty set.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Clamp a requested page to `[1, total_pages]` (1 when the set is empty).
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    /// The slice of `rows` belonging to `page` (clamped).
    pub fn slice<'a, T>(&self, rows: &'a [T], page: usize) -> &'a [T] {
        let page = self.clamp(page);
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        if start >= rows.len() {
            &[]
        } else {
            &rows[start..end]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceil() {
        assert_eq!(Paginator::new(10, 3).total_pages(), 4);
        assert_eq!(Paginator::new(9, 3).total_pages(), 3);
        assert_eq!(Paginator::new(0, 3).total_pages(), 0);
        assert_eq!(Paginator::new(1, 10).total_pages(), 1);
    }

    #[test]
    fn test_concatenated_pages_reproduce_the_set() {
        let rows: Vec<usize> = (0..23).collect();
        let paginator = Paginator::new(rows.len(), 5);

        let mut seen = Vec::new();
        for page in 1..=paginator.total_pages() {
            seen.extend_from_slice(paginator.slice(&rows, page));
        }
        assert_eq!(seen, rows);
    }

    #[test]
    fn test_clamp() {
        let paginator = Paginator::new(10, 3);
        assert_eq!(paginator.clamp(0), 1);
        assert_eq!(paginator.clamp(4), 4);
        assert_eq!(paginator.clamp(99), 4);

        // Empty set still clamps to page 1.
        assert_eq!(Paginator::new(0, 3).clamp(7), 1);
    }

    #[test]
    fn test_slice_bounds() {
        let rows: Vec<usize> = (0..7).collect();
        let paginator = Paginator::new(rows.len(), 3);

        assert_eq!(paginator.slice(&rows, 1), &[0, 1, 2]);
        assert_eq!(paginator.slice(&rows, 3), &[6]);
        // Out-of-range pages clamp to the last page.
        assert_eq!(paginator.slice(&rows, 9), &[6]);
    }

    #[test]
    fn test_zero_page_size_coerced() {
        assert_eq!(Paginator::new(5, 0).page_size(), 1);
        assert_eq!(Paginator::new(5, 0).total_pages(), 5);
    }
}
