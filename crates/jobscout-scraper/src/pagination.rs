//! Page-count math and the inter-page politeness delay.
//!
//! The search page is offset-paginated: `pageNum` is a 0-based index and
//! every page holds a fixed number of cards. The total is read once from the
//! first page's result-count header.

use std::time::Duration;

use rand::Rng;

/// Number of pages needed to cover `total_jobs` at `page_size` cards per page.
///
/// A zero `page_size` yields `0` rather than dividing by zero.
#[must_use]
pub fn page_count(total_jobs: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_jobs.div_ceil(page_size)
}

/// Samples the pause taken after each page, uniform over
/// `[min_ms, max_ms]` inclusive. Swapped bounds are normalized.
#[must_use]
pub fn politeness_delay(min_ms: u64, max_ms: u64) -> Duration {
    let (lo, hi) = if min_ms <= max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    if lo == hi {
        return Duration::from_millis(lo);
    }
    Duration::from_millis(rand::rng().random_range(lo..=hi))
}
