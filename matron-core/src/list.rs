//! List query/result state shared by every list view.

/// Ephemeral query state for a list view: search term, current page, page
/// size. Invariants: `page >= 1`, `page_size >= 1`. Changing the search term
/// or page size resets to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search_term: String,
    page: usize,
    page_size: usize,
}

impl ListQuery {
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set the search term. Any change resets to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.page = 1;
        }
    }

    /// Request a page; values below 1 are coerced to 1. Clamping against the
    /// filtered set size happens at slice time.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Change the page size. Always resets to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of projected, filtered rows plus the fetch state it was derived
/// from.
#[derive(Debug, Clone, Default)]
pub struct ListResult<T> {
    /// The current page's slice after filtering.
    pub rows: Vec<T>,
    /// Size of the filtered set (or the backend total for server-paginated
    /// views).
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub is_loading: bool,
    pub is_validating: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_change_resets_page() {
        let mut query = ListQuery::new(10);
        query.set_page(4);
        query.set_search_term("bed");
        assert_eq!(query.page(), 1);

        // Setting the same term again is not a change.
        query.set_page(3);
        query.set_search_term("bed");
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut query = ListQuery::new(10);
        query.set_page(4);
        query.set_page_size(25);
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 25);
    }

    #[test]
    fn test_invariants_enforced() {
        let mut query = ListQuery::new(0);
        assert_eq!(query.page_size(), 1);
        query.set_page(0);
        assert_eq!(query.page(), 1);
        query.set_page_size(0);
        assert_eq!(query.page_size(), 1);
    }
}
