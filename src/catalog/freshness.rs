use std::time::Duration;

/// True while the catalog is younger than `ttl`. An absent catalog is never fresh.
///
/// A header from the future counts as age zero.
pub fn is_fresh(last_update: Option<i64>, ttl: Duration, now: i64) -> bool {
    let Some(last_update) = last_update else {
        return false;
    };

    let age = now.saturating_sub(last_update).max(0) as u64;
    Duration::from_secs(age) < ttl
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(86_400);

    #[test]
    fn absent_catalog_is_stale() {
        assert!(!is_fresh(None, DAY, 1_700_000_000));
    }

    #[test]
    fn freshness_needs_strictly_less_than_ttl() {
        let now = 1_700_000_000;
        assert!(is_fresh(Some(now - 86_399), DAY, now));
        assert!(!is_fresh(Some(now - 86_400), DAY, now));
        assert!(!is_fresh(Some(now - 86_401), DAY, now));
    }

    #[test]
    fn just_written_catalog_is_fresh() {
        assert!(is_fresh(Some(1_700_000_000), DAY, 1_700_000_000));
    }

    #[test]
    fn sub_second_ttl_keeps_a_same_second_catalog() {
        let ttl = Duration::from_millis(500);
        assert!(is_fresh(Some(1_700_000_000), ttl, 1_700_000_000));
        assert!(!is_fresh(Some(1_700_000_000), ttl, 1_700_000_001));
    }

    #[test]
    fn zero_ttl_is_always_stale() {
        assert!(!is_fresh(Some(1_700_000_000), Duration::ZERO, 1_700_000_000));
    }
}
