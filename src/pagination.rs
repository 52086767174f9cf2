use serde::Serialize;

/// Paginator
///
/// Splits an already-filtered result set into fixed-size pages with clamping
/// semantics: an underflowing or unparsable page request falls back to the
/// first page, an overflowing one to the last. An empty result set still has
/// exactly one valid, empty page, so callers never need a special case.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
}

/// One page of results plus the numbers the listing template needs to draw
/// pagination controls. `total` is the post-filter, pre-pagination count.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub total: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

impl Paginator {
    /// # Panics
    /// Panics if `per_page` is zero; page size is a compile-time choice of the
    /// calling view, never user input.
    pub fn new(per_page: usize) -> Self {
        assert!(per_page > 0, "per_page must be positive");
        Self { per_page }
    }

    /// Number of pages needed for `total` items; at least 1.
    pub fn num_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    /// Returns the requested page, clamped into the valid range.
    pub fn get_page<T>(&self, items: Vec<T>, requested: usize) -> Page<T> {
        let total = items.len();
        let num_pages = self.num_pages(total);
        let number = requested.clamp(1, num_pages);

        let start = (number - 1) * self.per_page;
        let page_items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(self.per_page)
            .collect();

        Page {
            items: page_items,
            number,
            num_pages,
            total,
            per_page: self.per_page,
        }
    }

    /// Parses a raw `page` query value. Anything that is not a positive
    /// integer means the first page; clamping to the last page happens in
    /// `get_page` once the total is known.
    pub fn parse_page_number(raw: Option<&str>) -> usize {
        raw.and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(1)
    }
}
