use serde::Serialize;

/// One display page of a longer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed for `total` entries, `ceil(total / per_page)`.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Slice out page `page` (1-based) of `per_page` entries.
///
/// Page numbers below 1 are served as page 1. A page past the end comes back
/// empty but still carries the totals.
pub fn paginate<T>(all: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total = all.len();
    let offset = (page - 1).saturating_mul(per_page);

    let items = all.into_iter().skip(offset).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages: total_pages(total, per_page),
    }
}
