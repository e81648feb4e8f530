//! User request preferences and the derived interest weighting.

use std::collections::HashMap;

use crate::poi::Category;

/// Maps a 1..=5 star rating to the multiplier applied to a POI's base
/// score, per spec §3.
fn star_to_raw_weight(star: u8) -> f64 {
    match star {
        1 => 0.1,
        2 => 0.5,
        3 => 1.0,
        4 => 1.5,
        _ => 2.0,
    }
}

/// A user's budget, time horizon, start node and category star-ratings.
///
/// Time fields are stored in the POI dataset's native unit (minutes, the
/// Solomon convention this crate follows, spec §9). Construct with
/// [`UserPreferences::from_hours`] when the caller's input is in hours.
///
/// # Examples
///
/// ```
/// use toptw_hga::poi::Category;
/// use toptw_hga::preferences::UserPreferences;
///
/// let stars = Category::all_interests().map(|c| (c, 3)).into_iter().collect();
/// let prefs = UserPreferences::from_hours(500.0, 8.0, 17.0, 0, stars).unwrap();
/// assert!((prefs.end_time() - prefs.start_time() - 9.0 * 60.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct UserPreferences {
    budget: f64,
    start_time: f64,
    end_time: f64,
    start_node_id: usize,
    stars: HashMap<Category, u8>,
}

impl UserPreferences {
    /// Creates preferences whose `start_time`/`end_time` are already in the
    /// dataset's native minute unit.
    ///
    /// Returns `None` if `budget <= 0`, if `end_time - start_time < 60.0`
    /// (one hour in minutes), or if `stars` doesn't cover exactly the five
    /// non-depot categories with values in `1..=5`.
    pub fn new(
        budget: f64,
        start_time: f64,
        end_time: f64,
        start_node_id: usize,
        stars: HashMap<Category, u8>,
    ) -> Option<Self> {
        if budget <= 0.0 {
            return None;
        }
        if end_time - start_time < 60.0 {
            return None;
        }
        if stars.len() != Category::all_interests().len() {
            return None;
        }
        for category in Category::all_interests() {
            match stars.get(&category) {
                Some(1..=5) => {}
                _ => return None,
            }
        }
        Some(Self {
            budget,
            start_time,
            end_time,
            start_node_id,
            stars,
        })
    }

    /// Creates preferences from hour-denominated `start_time`/`end_time`,
    /// converting to minutes (spec §9 time-unit convention).
    pub fn from_hours(
        budget: f64,
        start_time_hours: f64,
        end_time_hours: f64,
        start_node_id: usize,
        stars: HashMap<Category, u8>,
    ) -> Option<Self> {
        Self::new(
            budget,
            start_time_hours * 60.0,
            end_time_hours * 60.0,
            start_node_id,
            stars,
        )
    }

    /// Budget ceiling for the whole route.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Horizon start, in the dataset's native time unit.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Horizon end, in the dataset's native time unit.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// The POI id the route must start and end at.
    pub fn start_node_id(&self) -> usize {
        self.start_node_id
    }

    /// Derived interest weights: stars mapped to raw multipliers then
    /// normalized so the weights sum to the category count (mean 1.0),
    /// per spec §3.
    pub fn interest_weights(&self) -> HashMap<Category, f64> {
        let raw: HashMap<Category, f64> = self
            .stars
            .iter()
            .map(|(&c, &s)| (c, star_to_raw_weight(s)))
            .collect();
        let sum: f64 = raw.values().sum();
        let n = raw.len() as f64;
        if sum <= 0.0 {
            return raw;
        }
        raw.into_iter().map(|(c, w)| (c, w * n / sum)).collect()
    }

    /// The weight for a single category (0.0 for [`Category::Depot`]).
    pub fn weight_for(&self, category: Category) -> f64 {
        if category == Category::Depot {
            return 0.0;
        }
        self.interest_weights().get(&category).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_stars(star: u8) -> HashMap<Category, u8> {
        Category::all_interests().into_iter().map(|c| (c, star)).collect()
    }

    #[test]
    fn rejects_nonpositive_budget() {
        assert!(UserPreferences::new(0.0, 0.0, 600.0, 0, uniform_stars(3)).is_none());
        assert!(UserPreferences::new(-5.0, 0.0, 600.0, 0, uniform_stars(3)).is_none());
    }

    #[test]
    fn rejects_horizon_shorter_than_one_hour() {
        assert!(UserPreferences::new(100.0, 0.0, 59.0, 0, uniform_stars(3)).is_none());
        assert!(UserPreferences::new(100.0, 0.0, 60.0, 0, uniform_stars(3)).is_some());
    }

    #[test]
    fn rejects_incomplete_star_map() {
        let mut stars = uniform_stars(3);
        stars.remove(&Category::Shopping);
        assert!(UserPreferences::new(100.0, 0.0, 600.0, 0, stars).is_none());
    }

    #[test]
    fn rejects_out_of_range_star() {
        let mut stars = uniform_stars(3);
        stars.insert(Category::Shopping, 6);
        assert!(UserPreferences::new(100.0, 0.0, 600.0, 0, stars).is_none());
    }

    #[test]
    fn from_hours_converts_to_minutes() {
        let prefs =
            UserPreferences::from_hours(500.0, 8.0, 17.0, 0, uniform_stars(3)).expect("valid");
        assert!((prefs.start_time() - 480.0).abs() < 1e-9);
        assert!((prefs.end_time() - 1020.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_three_star_weights_normalize_to_one() {
        let prefs = UserPreferences::new(100.0, 0.0, 600.0, 0, uniform_stars(3)).expect("valid");
        for (_, w) in prefs.interest_weights() {
            assert!((w - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn weights_sum_to_category_count() {
        let mut stars = uniform_stars(3);
        stars.insert(Category::HistoryCulture, 5);
        stars.insert(Category::Shopping, 1);
        let prefs = UserPreferences::new(100.0, 0.0, 600.0, 0, stars).expect("valid");
        let sum: f64 = prefs.interest_weights().values().sum();
        assert!((sum - 5.0).abs() < 1e-9);
    }

    #[test]
    fn depot_weight_is_always_zero() {
        let prefs = UserPreferences::new(100.0, 0.0, 600.0, 0, uniform_stars(5)).expect("valid");
        assert_eq!(prefs.weight_for(Category::Depot), 0.0);
    }

    #[test]
    fn ranking_identical_under_uniform_stars_regardless_of_level() {
        // S4: stars {3,3,3,3,3} vs {1,1,1,1,1} normalize to the same
        // per-category weight, so any comparison of two individuals on the
        // same route must agree between the two preference sets.
        let uniform3 = UserPreferences::new(100.0, 0.0, 600.0, 0, uniform_stars(3)).unwrap();
        let uniform1 = UserPreferences::new(100.0, 0.0, 600.0, 0, uniform_stars(1)).unwrap();
        for category in Category::all_interests() {
            assert!(
                (uniform3.weight_for(category) - uniform1.weight_for(category)).abs() < 1e-9
            );
        }
    }
}
