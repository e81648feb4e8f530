//! Points of interest and their time window constraints.

use serde::{Deserialize, Serialize};

/// The category tag attached to a point of interest.
///
/// Exactly one POI in a catalog carries [`Category::Depot`].
///
/// # Examples
///
/// ```
/// use toptw_hga::poi::Category;
///
/// assert_eq!(Category::all_interests().len(), 5);
/// assert!(!Category::all_interests().contains(&Category::Depot));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The single start/end node of every route.
    Depot,
    /// Museums, monuments, temples and other cultural landmarks.
    HistoryCulture,
    /// Parks, gardens and other outdoor/nature sites.
    NatureParks,
    /// Restaurants, cafes and other food and drink venues.
    FoodDrink,
    /// Markets, malls and other shopping destinations.
    Shopping,
    /// Theatres, cinemas and other entertainment venues.
    Entertainment,
}

impl Category {
    /// The five non-depot categories a [`crate::preferences::UserPreferences`]
    /// assigns a star rating to.
    pub fn all_interests() -> [Category; 5] {
        [
            Category::HistoryCulture,
            Category::NatureParks,
            Category::FoodDrink,
            Category::Shopping,
            Category::Entertainment,
        ]
    }
}

/// A time window constraint for service at a POI.
///
/// The visitor must arrive no later than `close_time` and may arrive as
/// early as `open_time` (waiting is allowed when early).
///
/// # Examples
///
/// ```
/// use toptw_hga::poi::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.open_time() <= tw.close_time());
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    open_time: f64,
    close_time: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `open_time > close_time` or either value is
    /// non-finite.
    pub fn new(open_time: f64, close_time: f64) -> Option<Self> {
        if !open_time.is_finite() || !close_time.is_finite() || open_time > close_time {
            return None;
        }
        Some(Self {
            open_time,
            close_time,
        })
    }

    /// Earliest allowable arrival time.
    pub fn open_time(&self) -> f64 {
        self.open_time
    }

    /// Latest allowable arrival time.
    pub fn close_time(&self) -> f64 {
        self.close_time
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.open_time && time <= self.close_time
    }

    /// Returns the waiting time incurred by arriving at `arrival`.
    ///
    /// Zero if the arrival is within or after the window.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.open_time {
            self.open_time - arrival
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at `arrival` violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.close_time
    }
}

/// A point of interest: the depot, or a visitable location.
///
/// Immutable once loaded. The depot is the POI with `id == 0` and
/// `category == Category::Depot`; it carries a zero-width time window
/// spanning the whole horizon and contributes nothing to fitness.
///
/// # Examples
///
/// ```
/// use toptw_hga::poi::{Category, Poi, TimeWindow};
///
/// let depot = Poi::depot(0.0, 0.0, TimeWindow::new(0.0, 600.0).unwrap());
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.category(), Category::Depot);
///
/// let museum = Poi::new(
///     1, 3.0, 4.0, 40.0,
///     TimeWindow::new(0.0, 300.0).unwrap(),
///     60.0, 15.0, Category::HistoryCulture,
/// );
/// assert_eq!(museum.id(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    id: usize,
    x: f64,
    y: f64,
    base_score: f64,
    time_window: TimeWindow,
    service_duration: f64,
    price: f64,
    category: Category,
}

impl Poi {
    /// Creates a new non-depot POI.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        x: f64,
        y: f64,
        base_score: f64,
        time_window: TimeWindow,
        service_duration: f64,
        price: f64,
        category: Category,
    ) -> Self {
        Self {
            id,
            x,
            y,
            base_score,
            time_window,
            service_duration,
            price,
            category,
        }
    }

    /// Creates the depot at the given coordinates.
    pub fn depot(x: f64, y: f64, horizon: TimeWindow) -> Self {
        Self {
            id: 0,
            x,
            y,
            base_score: 0.0,
            time_window: horizon,
            service_duration: 0.0,
            price: 0.0,
            category: Category::Depot,
        }
    }

    /// POI id (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Base (unweighted) visitor score.
    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    /// Opening time window.
    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Time spent servicing (visiting) this POI.
    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    /// Entry price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Category tag.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Euclidean distance to another POI.
    pub fn distance_to(&self, other: &Poi) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
