use serde::Serialize;

/// Hard ceiling on page size, shared by every paginated endpoint.
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Normalized page request: `page` is 1-based and `limit` is clamped to the
/// endpoint default and the global maximum before any store is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    page: u32,
    limit: u32,
}

impl PageSpec {
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(default_limit)
            .clamp(1, MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip: `(page - 1) * limit`.
    pub fn skip(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }

    pub fn take(&self) -> usize {
        self.limit as usize
    }
}

/// Response envelope describing where a page sits in the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn for_total(spec: &PageSpec, total: u64) -> Self {
        let limit = spec.limit as u64;
        let pages = total.div_ceil(limit) as u32;
        Self {
            page: spec.page,
            limit: spec.limit,
            pages,
            has_next: (spec.page as u64) * limit < total,
            has_prev: spec.page > 1,
        }
    }
}

/// One page of results plus the totals the envelope reports.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Paginate an already-filtered, already-sorted in-memory result set.
    pub fn slice(items: Vec<T>, spec: &PageSpec) -> Self {
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(spec.skip())
            .take(spec.take())
            .collect();
        Self {
            items,
            total,
            pagination: Pagination::for_total(spec, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pagination: self.pagination,
        }
    }
}
