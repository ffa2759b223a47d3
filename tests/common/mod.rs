//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{
    assert_rows_close,
    max_error_against,
    params,
    relative_error,
    solve_with,
};
