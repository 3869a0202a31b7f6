//! Year-by-year sales plan
//!
//! Each row says which fraction of every saleable category is sold in that
//! year and how much unit prices escalate going into it. Row order is
//! chronological and significant: escalation compounds row over row.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::projection::round2;

/// Escalation applied to rows appended by [`YearPlan::resize`]
pub const DEFAULT_PRICE_INCREASE: f64 = 0.08;

/// Tolerance when checking that shares in a category sum to at most 1
const SHARE_SUM_TOLERANCE: f64 = 1e-9;

/// Smallest leftover the cascade will hand to a later row
const MIN_CASCADE_SHARE: f64 = 0.1;

/// Saleable area category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareCategory {
    Vip,
    Mezzanine,
    Administrative,
}

impl ShareCategory {
    pub const ALL: [ShareCategory; 3] = [
        ShareCategory::Vip,
        ShareCategory::Mezzanine,
        ShareCategory::Administrative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShareCategory::Vip => "VIP",
            ShareCategory::Mezzanine => "Mezzanine",
            ShareCategory::Administrative => "Administrative",
        }
    }
}

/// One forecast year of the sales plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearPlanRow {
    /// Calendar year label
    pub year: i32,
    /// Fractional escalation of unit prices entering this year (ignored for the first row)
    pub price_increase: f64,
    pub vip_share: f64,
    pub mezz_share: f64,
    pub admin_share: f64,
}

impl YearPlanRow {
    pub fn new(year: i32, price_increase: f64, vip_share: f64, mezz_share: f64, admin_share: f64) -> Self {
        Self { year, price_increase, vip_share, mezz_share, admin_share }
    }

    pub fn share(&self, category: ShareCategory) -> f64 {
        match category {
            ShareCategory::Vip => self.vip_share,
            ShareCategory::Mezzanine => self.mezz_share,
            ShareCategory::Administrative => self.admin_share,
        }
    }

    fn share_mut(&mut self, category: ShareCategory) -> &mut f64 {
        match category {
            ShareCategory::Vip => &mut self.vip_share,
            ShareCategory::Mezzanine => &mut self.mezz_share,
            ShareCategory::Administrative => &mut self.admin_share,
        }
    }
}

/// Per-category share sums across the whole plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareUsage {
    pub vip_sum: f64,
    pub mezz_sum: f64,
    pub admin_sum: f64,
    pub vip_exceeded: bool,
    pub mezz_exceeded: bool,
    pub admin_exceeded: bool,
}

impl ShareUsage {
    pub fn sum(&self, category: ShareCategory) -> f64 {
        match category {
            ShareCategory::Vip => self.vip_sum,
            ShareCategory::Mezzanine => self.mezz_sum,
            ShareCategory::Administrative => self.admin_sum,
        }
    }

    pub fn exceeded(&self, category: ShareCategory) -> bool {
        match category {
            ShareCategory::Vip => self.vip_exceeded,
            ShareCategory::Mezzanine => self.mezz_exceeded,
            ShareCategory::Administrative => self.admin_exceeded,
        }
    }

    /// True when any category sells more than its full area
    pub fn any_exceeded(&self) -> bool {
        self.vip_exceeded || self.mezz_exceeded || self.admin_exceeded
    }
}

/// Ordered sequence of plan rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearPlan {
    rows: Vec<YearPlanRow>,
}

impl YearPlan {
    pub fn new(rows: Vec<YearPlanRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[YearPlanRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [YearPlanRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&YearPlanRow> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut YearPlanRow> {
        self.rows.get_mut(index)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.rows.first().map(|r| r.year)
    }

    /// Grow or shrink the plan to `count` rows
    ///
    /// New rows follow the last year (or start at `fallback_start_year` when
    /// the plan is empty), escalate at 8% and sell the remaining
    /// administrative area.
    pub fn resize(&mut self, count: usize, fallback_start_year: i32) {
        if count <= self.rows.len() {
            self.rows.truncate(count);
            return;
        }

        let (mut next_year, start) = match self.rows.last() {
            Some(last) => (last.year + 1, self.rows.len()),
            None => (fallback_start_year, 0),
        };

        for _ in start..count {
            self.rows.push(YearPlanRow::new(next_year, DEFAULT_PRICE_INCREASE, 0.0, 0.0, 1.0));
            next_year += 1;
        }
    }

    /// Share of a category still unsold before row `index`, rounded to 2dp
    pub fn remaining_share(&self, index: usize, category: ShareCategory) -> f64 {
        let used: f64 = self.rows.iter().take(index).map(|r| r.share(category)).sum();
        round2((1.0 - used).max(0.0))
    }

    /// Set a row's share and cascade the leftover through the later rows
    ///
    /// The new value is clamped to what is still unsold before the row.
    /// Later rows keep their share while it fits in the leftover; the first
    /// row that does not fit takes the whole leftover if it is at least 10%,
    /// and every row after that is zeroed. Returns the value applied, or
    /// `None` for an unknown row or a non-finite value.
    pub fn set_share(&mut self, index: usize, category: ShareCategory, value: f64) -> Option<f64> {
        if index >= self.rows.len() || !value.is_finite() {
            return None;
        }

        let available = self.remaining_share(index, category);
        let applied = value.clamp(0.0, available);
        *self.rows[index].share_mut(category) = applied;

        let mut leftover = round2(available - applied);
        for row in self.rows.iter_mut().skip(index + 1) {
            let share = row.share_mut(category);
            if *share <= leftover {
                leftover = round2(leftover - *share);
            } else if leftover >= MIN_CASCADE_SHARE {
                *share = leftover;
                leftover = 0.0;
            } else {
                *share = 0.0;
            }
        }

        Some(applied)
    }

    /// Sum shares per category and flag any category sold beyond 100%
    pub fn share_usage(&self) -> ShareUsage {
        let mut vip_sum = 0.0;
        let mut mezz_sum = 0.0;
        let mut admin_sum = 0.0;
        for row in &self.rows {
            vip_sum += row.vip_share;
            mezz_sum += row.mezz_share;
            admin_sum += row.admin_share;
        }

        let usage = ShareUsage {
            vip_sum,
            mezz_sum,
            admin_sum,
            vip_exceeded: vip_sum > 1.0 + SHARE_SUM_TOLERANCE,
            mezz_exceeded: mezz_sum > 1.0 + SHARE_SUM_TOLERANCE,
            admin_exceeded: admin_sum > 1.0 + SHARE_SUM_TOLERANCE,
        };

        for category in ShareCategory::ALL {
            if usage.exceeded(category) {
                warn!(
                    "{} shares sum to {:.4}, more than the full area is planned for sale",
                    category.label(),
                    usage.sum(category)
                );
            }
        }

        usage
    }
}

impl Default for YearPlan {
    /// Nine-year plan starting 2025 with 8% annual escalation
    fn default() -> Self {
        Self::new(vec![
            YearPlanRow::new(2025, 0.08, 0.5, 0.2, 0.2),
            YearPlanRow::new(2026, 0.08, 0.1, 0.1, 0.1),
            YearPlanRow::new(2027, 0.08, 0.1, 0.1, 0.1),
            YearPlanRow::new(2028, 0.08, 0.1, 0.1, 0.1),
            YearPlanRow::new(2029, 0.08, 0.2, 0.1, 0.1),
            YearPlanRow::new(2030, 0.08, 0.0, 0.1, 0.1),
            YearPlanRow::new(2031, 0.08, 0.0, 0.1, 0.1),
            YearPlanRow::new(2032, 0.08, 0.0, 0.1, 0.1),
            YearPlanRow::new(2033, 0.08, 0.0, 0.1, 0.1),
        ])
    }
}

impl From<Vec<YearPlanRow>> for YearPlan {
    fn from(rows: Vec<YearPlanRow>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_plan_shares() {
        let usage = YearPlan::default().share_usage();

        assert_relative_eq!(usage.vip_sum, 1.0, epsilon = 1e-12);
        assert_relative_eq!(usage.mezz_sum, 1.0, epsilon = 1e-12);
        assert_relative_eq!(usage.admin_sum, 1.0, epsilon = 1e-12);
        assert!(!usage.any_exceeded());
    }

    #[test]
    fn test_share_overflow_is_flagged() {
        let plan = YearPlan::new(vec![
            YearPlanRow::new(2025, 0.0, 0.7, 0.0, 0.0),
            YearPlanRow::new(2026, 0.0, 0.5, 0.0, 0.0),
        ]);
        let usage = plan.share_usage();

        assert!(usage.vip_exceeded);
        assert!(!usage.mezz_exceeded);
        assert!(usage.any_exceeded());
    }

    #[test]
    fn test_resize_grows_from_last_year() {
        let mut plan = YearPlan::default();
        plan.resize(11, 2025);

        assert_eq!(plan.len(), 11);
        let added = plan.get(10).unwrap();
        assert_eq!(added.year, 2035);
        assert_relative_eq!(added.price_increase, DEFAULT_PRICE_INCREASE);
        assert_relative_eq!(added.admin_share, 1.0);
        assert_relative_eq!(added.vip_share, 0.0);
    }

    #[test]
    fn test_resize_empty_and_shrink() {
        let mut plan = YearPlan::new(Vec::new());
        plan.resize(2, 2030);
        assert_eq!(plan.first_year(), Some(2030));
        assert_eq!(plan.get(1).unwrap().year, 2031);

        plan.resize(1, 2030);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_remaining_share() {
        let plan = YearPlan::default();

        assert_relative_eq!(plan.remaining_share(0, ShareCategory::Vip), 1.0);
        assert_relative_eq!(plan.remaining_share(1, ShareCategory::Vip), 0.5);
        assert_relative_eq!(plan.remaining_share(5, ShareCategory::Vip), 0.0);
        assert_relative_eq!(plan.remaining_share(3, ShareCategory::Administrative), 0.6);
    }

    #[test]
    fn test_set_share_cascades_leftover() {
        let mut plan = YearPlan::default();

        // Selling 70% of VIP up front leaves 30% for the remaining years
        let applied = plan.set_share(0, ShareCategory::Vip, 0.7).unwrap();
        assert_relative_eq!(applied, 0.7);

        let vip: Vec<f64> = plan.rows().iter().map(|r| r.vip_share).collect();
        // 0.1 and 0.1 fit, then 0.1 fits leaving 0.0, then 0.2 is zeroed
        assert_relative_eq!(vip[1], 0.1);
        assert_relative_eq!(vip[2], 0.1);
        assert_relative_eq!(vip[3], 0.1);
        assert_relative_eq!(vip[4], 0.0);
        assert!(!plan.share_usage().vip_exceeded);
    }

    #[test]
    fn test_set_share_hands_leftover_to_larger_row() {
        let mut plan = YearPlan::new(vec![
            YearPlanRow::new(2025, 0.0, 0.2, 0.0, 0.0),
            YearPlanRow::new(2026, 0.0, 0.9, 0.0, 0.0),
            YearPlanRow::new(2027, 0.0, 0.3, 0.0, 0.0),
        ]);

        plan.set_share(0, ShareCategory::Vip, 0.4);

        assert_relative_eq!(plan.get(1).unwrap().vip_share, 0.6);
        assert_relative_eq!(plan.get(2).unwrap().vip_share, 0.0);
    }

    #[test]
    fn test_set_share_clamps_and_rejects_out_of_range() {
        let mut plan = YearPlan::default();

        let applied = plan.set_share(1, ShareCategory::Mezzanine, 0.95).unwrap();
        assert_relative_eq!(applied, 0.8);
        assert!(plan.set_share(42, ShareCategory::Mezzanine, 0.1).is_none());
    }

    #[test]
    fn test_set_share_rejects_nan() {
        let mut plan = YearPlan::default();

        assert!(plan.set_share(0, ShareCategory::Vip, f64::NAN).is_none());
        assert_eq!(plan, YearPlan::default());
    }
}
