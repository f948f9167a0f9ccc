//! Page selection module
//!
//! The missing-episode listing is paged with a page size of one, so a page
//! index doubles as an index into the air-date-sorted backlog. This module
//! decides which page to fetch when the caller did not pick one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Chooses which page of the missing-episode listing to fetch.
///
/// Implementors of this trait supply the 1-based page index used for the
/// selection query. Keeping this behind a trait lets tests substitute a
/// deterministic chooser for the wall-clock-seeded one.
pub trait PageChooser {
    /// Picks a 1-based page index given the total record count reported by
    /// the server.
    fn choose_page(&mut self, total_records: u32) -> u32;
}

/// Uniform random chooser seeded from the wall clock.
///
/// The seed is the current Unix time at second granularity. The draw is not
/// cryptographically relevant; it only has to spread picks across the
/// backlog.
pub struct TimeSeededChooser;

impl PageChooser for TimeSeededChooser {
    fn choose_page(&mut self, total_records: u32) -> u32 {
        // A backlog of zero or one entries leaves no room for a draw;
        // page 1 is the only page there is.
        if total_records <= 1 {
            return 1;
        }

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);

        let mut rng = StdRng::seed_from_u64(seed);
        rng.gen_range(1..total_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_page_stays_within_bounds() {
        let mut chooser = TimeSeededChooser;
        for total in 2..200 {
            let page = chooser.choose_page(total);
            assert!(page >= 1, "page {page} below 1 for total {total}");
            assert!(page < total, "page {page} not below total {total}");
        }
    }

    #[test]
    fn test_choose_page_with_two_records_always_picks_first() {
        let mut chooser = TimeSeededChooser;
        assert_eq!(chooser.choose_page(2), 1);
    }

    #[test]
    fn test_choose_page_with_degenerate_totals_picks_page_one() {
        let mut chooser = TimeSeededChooser;
        assert_eq!(chooser.choose_page(1), 1);
        assert_eq!(chooser.choose_page(0), 1);
    }
}
