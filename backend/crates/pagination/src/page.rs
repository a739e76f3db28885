//! Page envelope and the slicing function that produces it.

use serde::{Deserialize, Serialize};

use crate::request::PageRequest;

/// A bounded, ordered slice of a larger sequence plus its size metadata.
///
/// ## Invariants
/// - `total_pages` is `ceil(total_items / page_size)` and never below 1.
/// - `items.len()` is at most `page_size`; it is zero for pages past the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page_number: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
}

impl<T> Page<T> {
    /// Items on this page, in the order of the source sequence.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// One-based number of this page.
    #[must_use]
    pub const fn page_number(&self) -> usize {
        self.page_number
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items in the whole source sequence.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages needed to cover the source sequence (at least 1).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether a later page holds items.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Transform the items while keeping the page metadata.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, paginate};
    ///
    /// let page = paginate(vec![1, 2, 3], PageRequest::new(1, 2)).map(|n| n * 10);
    /// assert_eq!(page.items(), [10, 20]);
    /// assert_eq!(page.total_items(), 3);
    /// ```
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `items` into the page described by `request`.
///
/// Pages beyond the last one yield an empty item list with the metadata still
/// populated. The input order is preserved.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, paginate};
///
/// let empty = paginate(Vec::<u8>::new(), PageRequest::new(1, 10));
/// assert!(empty.items().is_empty());
/// assert_eq!(empty.total_pages(), 1);
///
/// let past_end = paginate(vec![1, 2, 3], PageRequest::new(5, 2));
/// assert!(past_end.items().is_empty());
/// assert_eq!(past_end.page_number(), 5);
/// assert_eq!(past_end.total_pages(), 2);
/// ```
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let page_size = request.page_size();
    let total_pages = total_items.div_ceil(page_size).max(1);

    let page_items = match request.offset() {
        Some(offset) if offset < total_items => {
            items.into_iter().skip(offset).take(page_size).collect()
        }
        _ => Vec::new(),
    };

    Page {
        items: page_items,
        page_number: request.page(),
        page_size,
        total_items,
        total_pages,
    }
}
