//! Current-page recovery after the page count shrinks.

/// What to do when the current page no longer exists.
///
/// Applied once per recompute, after the page count has been derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRecovery {
    /// Jump back to the first page.
    #[default]
    ResetToFirst,
    /// Stay as close as possible by moving to the last page.
    ClampToLast,
}

impl PageRecovery {
    /// Returns the page to show given the current page and page count.
    ///
    /// Pages that are still valid are returned unchanged, as is any page
    /// when there are no pages at all.
    pub fn recover(self, current: usize, total: usize) -> usize {
        if total == 0 || current <= total {
            return current.max(1);
        }
        match self {
            PageRecovery::ResetToFirst => 1,
            PageRecovery::ClampToLast => total,
        }
    }
}
