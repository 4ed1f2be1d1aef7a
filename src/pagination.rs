//! Page-window computation and link generation for paginated listings.

use serde::Serialize;

/// Fixed listing page size.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Numbers shown around the edges and the current page; `None` marks a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);
    let mid_start = left_end
        .max(current_page.saturating_sub(left_current))
        .min(mid_end);

    if mid_start > left_end && mid_start < mid_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    // Current page past the end leaves the middle window empty.
    let covered = if mid_start < mid_end { mid_end } else { left_end };
    let right_start = covered.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > covered {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Builds `path?<filters>&page=N`. Filters serialize as a form query, so
/// anything that produced the current page is carried into every link.
pub fn page_url<Q: Serialize + ?Sized>(
    path: &str,
    filters: &Q,
    page: usize,
) -> Result<String, serde_html_form::ser::Error> {
    let mut query = serde_html_form::to_string(filters)?;
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(&format!("page={page}"));
    Ok(format!("{path}?{query}"))
}

/// Single entry of the rendered paginator.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    /// `None` for gaps and for the disabled previous/next buttons.
    pub url: Option<String>,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    /// One-based index of the first item on this page, `None` when empty.
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub links: Vec<PageLink>,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        let (from, to) = if items.is_empty() {
            (None, None)
        } else {
            let from = (current_page - 1) * per_page + 1;
            (Some(from), Some(from + items.len() - 1))
        };

        Self {
            items,
            pages,
            page: current_page,
            per_page,
            total,
            total_pages,
            from,
            to,
            links: Vec::new(),
            prev_url: None,
            next_url: None,
        }
    }

    /// Fills in previous/next and per-page links for `path`, each carrying
    /// `filters` in its query string.
    pub fn with_links<Q: Serialize + ?Sized>(
        mut self,
        path: &str,
        filters: &Q,
    ) -> Result<Self, serde_html_form::ser::Error> {
        self.prev_url = if self.page > 1 {
            Some(page_url(path, filters, self.page - 1)?)
        } else {
            None
        };
        self.next_url = if self.page < self.total_pages {
            Some(page_url(path, filters, self.page + 1)?)
        } else {
            None
        };

        let mut links = Vec::with_capacity(self.pages.len() + 2);
        links.push(PageLink {
            label: "Previous".to_string(),
            url: self.prev_url.clone(),
            active: false,
        });
        for page in &self.pages {
            links.push(match page {
                Some(number) => PageLink {
                    label: number.to_string(),
                    url: Some(page_url(path, filters, *number)?),
                    active: *number == self.page,
                },
                None => PageLink {
                    label: "...".to_string(),
                    url: None,
                    active: false,
                },
            });
        }
        links.push(PageLink {
            label: "Next".to_string(),
            url: self.next_url.clone(),
            active: false,
        });
        self.links = links;

        Ok(self)
    }

    /// Converts the items while keeping the pagination metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            from: self.from,
            to: self.to,
            links: self.links,
            prev_url: self.prev_url,
            next_url: self.next_url,
        }
    }
}
