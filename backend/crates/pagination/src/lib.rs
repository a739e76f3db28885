//! Page-number pagination primitives shared by listing endpoints.
//!
//! Pagination is a display convenience rather than a validation gate:
//! out-of-range inputs are corrected instead of rejected, and pages past the
//! end of the collection are empty rather than errors.
//!
//! # Example
//!
//! ```
//! use pagination::{PageRequest, paginate};
//!
//! let page = paginate(vec!["a", "b", "c"], PageRequest::new(2, 2));
//!
//! assert_eq!(page.items(), ["c"]);
//! assert_eq!(page.total_items(), 3);
//! assert_eq!(page.total_pages(), 2);
//! assert!(!page.has_next());
//! ```

mod page;
mod request;

pub use page::{Page, paginate};
pub use request::{DEFAULT_PAGE_SIZE, PageRequest};
