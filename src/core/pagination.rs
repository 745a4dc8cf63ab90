// Fixed-size pagination with clamping of out-of-range page numbers

use serde::{Deserialize, Serialize};

/// Posts per feed page. Not configurable per request.
pub const PAGE_SIZE: u64 = 10;

/// A page number as requested by the client, before clamping against the result size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest(pub i64);

impl PageRequest {
    /// Parse the raw `page` query value. Anything but an integer, `"2.0"`
    /// included, means page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(Self)
            .unwrap_or_else(Self::first)
    }

    pub fn first() -> Self {
        Self(1)
    }

    pub fn number(self) -> i64 {
        self.0
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// The slice of a result set that a resolved page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(count: u64) -> Self {
        Self::with_page_size(count, PAGE_SIZE)
    }

    pub(crate) fn with_page_size(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Always at least 1: an empty result still has an (empty) first page.
    pub fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Resolve a requested page. Numbers past the last page, and numbers below 1,
    /// fall back to the last page.
    pub fn window(&self, request: PageRequest) -> PageWindow {
        let last = self.num_pages();
        let number = match u64::try_from(request.number()) {
            Ok(n) if (1..=last).contains(&n) => n,
            _ => last,
        };
        PageWindow {
            number,
            offset: (number - 1) * self.per_page,
            limit: self.per_page,
        }
    }
}

/// One page of a feed together with the navigation data a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<u64>,
    pub previous_page_number: Option<u64>,
}

impl<T> FeedPage<T> {
    pub fn new(items: Vec<T>, window: PageWindow, paginator: &Paginator) -> Self {
        let num_pages = paginator.num_pages();
        let has_next = window.number < num_pages;
        let has_previous = window.number > 1;
        Self {
            items,
            number: window.number,
            num_pages,
            count: paginator.count(),
            has_next,
            has_previous,
            next_page_number: has_next.then_some(window.number + 1),
            previous_page_number: has_previous.then(|| window.number - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_request() {
        assert_eq!(PageRequest::parse(None), PageRequest(1));
        assert_eq!(PageRequest::parse(Some("3")), PageRequest(3));
        assert_eq!(PageRequest::parse(Some(" 2 ")), PageRequest(2));
        assert_eq!(PageRequest::parse(Some("2.0")), PageRequest(1));
        assert_eq!(PageRequest::parse(Some("1e3")), PageRequest(1));
        assert_eq!(PageRequest::parse(Some("2.5")), PageRequest(1));
        assert_eq!(PageRequest::parse(Some("abc")), PageRequest(1));
        assert_eq!(PageRequest::parse(Some("-4")), PageRequest(-4));
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let paginator = Paginator::new(0);
        assert_eq!(paginator.num_pages(), 1);
        let window = paginator.window(PageRequest(5));
        assert_eq!(window.number, 1);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_clamps_to_last_page() {
        let paginator = Paginator::new(25);
        assert_eq!(paginator.num_pages(), 3);
        assert_eq!(paginator.window(PageRequest(2)).offset, 10);
        assert_eq!(paginator.window(PageRequest(99)).number, 3);
        assert_eq!(paginator.window(PageRequest(0)).number, 3);
        assert_eq!(paginator.window(PageRequest(-1)).number, 3);
    }

    #[test]
    fn test_exact_multiple() {
        let paginator = Paginator::new(20);
        assert_eq!(paginator.num_pages(), 2);
        let window = paginator.window(PageRequest(2));
        assert_eq!((window.offset, window.limit), (10, PAGE_SIZE));
    }

    #[test]
    fn test_feed_page_navigation() {
        let paginator = Paginator::with_page_size(5, 2);
        let middle = FeedPage::new(vec![3, 4], paginator.window(PageRequest(2)), &paginator);
        assert!(middle.has_next && middle.has_previous);
        assert_eq!(middle.next_page_number, Some(3));
        assert_eq!(middle.previous_page_number, Some(1));

        let last = FeedPage::new(vec![5], paginator.window(PageRequest(3)), &paginator);
        assert!(!last.has_next);
        assert_eq!(last.next_page_number, None);
        assert_eq!(last.count, 5);
    }
}
