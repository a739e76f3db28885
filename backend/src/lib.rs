//! Backend library modules.
//!
//! Person records flow from a [`domain::ports::PersonsQuery`] through the
//! filter, sort and pagination engines in [`domain`], and out through the
//! export adapters in [`outbound`]. [`report`] wires the pieces together for
//! the `persons-report` binary.

pub mod domain;
pub mod example_data;
pub mod outbound;
pub mod report;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
