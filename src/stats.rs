/// Cosmetic statistics shown in the popup header

const FOCUS_SCORE_FLOOR: u32 = 20;
const FOCUS_SCORE_CEILING: u32 = 100;
const FOCUS_PENALTY_PER_TAB: u32 = 4;

/// `max(20, 100 - 4 * total_tabs)`
pub fn focus_score(total_tabs: usize) -> u32 {
    let total = u32::try_from(total_tabs).unwrap_or(u32::MAX);
    FOCUS_SCORE_CEILING
        .saturating_sub(total.saturating_mul(FOCUS_PENALTY_PER_TAB))
        .max(FOCUS_SCORE_FLOOR)
}

/// Elapsed time since the popup opened, e.g. `3m 07s`
pub fn format_active_time(seconds: u64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

/// Header line summarising the window
pub fn tab_summary(total_tabs: usize, pinned_tabs: usize) -> String {
    match total_tabs {
        1 => format!("1 tab • {} pinned", pinned_tabs),
        n => format!("{} tabs • {} pinned", n, pinned_tabs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_score() {
        assert_eq!(focus_score(0), 100);
        assert_eq!(focus_score(10), 60);
        assert_eq!(focus_score(20), 20);
        assert_eq!(focus_score(25), 20);
        assert_eq!(focus_score(usize::MAX), 20);
    }

    #[test]
    fn test_format_active_time() {
        assert_eq!(format_active_time(0), "0m 00s");
        assert_eq!(format_active_time(59), "0m 59s");
        assert_eq!(format_active_time(187), "3m 07s");
        assert_eq!(format_active_time(3600), "60m 00s");
    }

    #[test]
    fn test_tab_summary() {
        assert_eq!(tab_summary(1, 0), "1 tab • 0 pinned");
        assert_eq!(tab_summary(12, 2), "12 tabs • 2 pinned");
    }
}
