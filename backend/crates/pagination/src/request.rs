//! Page request parameters and their correction rules.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A corrected (page number, page size) pair.
///
/// ## Invariants
/// - `page` is at least 1.
/// - `page_size` is at least 1.
///
/// Values below 1 are clamped to 1 and values beyond the platform's `usize`
/// range saturate, so construction never fails.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(0, -5);
/// assert_eq!(request.page(), 1);
/// assert_eq!(request.page_size(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(from = "PageRequestDto")]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Build a request, correcting out-of-range values to the nearest valid one.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: clamp_to_positive(page),
            page_size: clamp_to_positive(page_size),
        }
    }

    /// Build a request from optional inputs, falling back to page 1 and
    /// [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use pagination::{DEFAULT_PAGE_SIZE, PageRequest};
    ///
    /// let request = PageRequest::from_optional(None, Some(25));
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.page_size(), 25);
    ///
    /// let request = PageRequest::from_optional(Some(3), None);
    /// assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
    /// ```
    #[must_use]
    pub fn from_optional(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.map_or(1, clamp_to_positive),
            page_size: page_size.map_or(DEFAULT_PAGE_SIZE, clamp_to_positive),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Maximum number of items on a page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items preceding this page, or `None` when the offset does
    /// not fit in `usize`.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        self.page.saturating_sub(1).checked_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn clamp_to_positive(value: i64) -> usize {
    if value < 1 {
        return 1;
    }
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRequestDto {
    page: Option<i64>,
    page_size: Option<i64>,
}

impl From<PageRequestDto> for PageRequest {
    fn from(value: PageRequestDto) -> Self {
        Self::from_optional(value.page, value.page_size)
    }
}
