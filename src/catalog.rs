//! POI catalog ingestion: the Solomon-style tabular format of spec §6.
//!
//! Parses a CSV with columns `CUST NO.`, `XCOORD.`, `YCOORD.`, `DEMAND`,
//! `READY TIME`, `DUE DATE`, `SERVICE TIME`. `CUST NO.` is 1-based in the
//! file; the loader remaps it to a 0-based id, with the first row (id 0)
//! taken as the depot, and assigns category and price deterministically
//! from each non-depot id, matching the reference loader this crate's
//! behavior is ported from.

use std::collections::HashMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::poi::{Category, Poi, TimeWindow};

const CATEGORY_WEIGHTS: [(Category, f64); 5] = [
    (Category::HistoryCulture, 0.35),
    (Category::FoodDrink, 0.25),
    (Category::NatureParks, 0.15),
    (Category::Shopping, 0.15),
    (Category::Entertainment, 0.10),
];

/// Deterministic price tier (min, max) per category, drawn from the same
/// per-id seed as the category itself.
fn price_tier(category: Category) -> (f64, f64) {
    match category {
        Category::Depot => (0.0, 0.0),
        Category::HistoryCulture => (5.0, 15.0),
        Category::FoodDrink => (3.0, 12.0),
        Category::NatureParks => (0.0, 5.0),
        Category::Shopping => (0.0, 2.0),
        Category::Entertainment => (8.0, 20.0),
    }
}

/// Draws a category for `id` using the weighted distribution of spec §6,
/// seeded so the same id always draws the same category.
fn assign_category(id: usize) -> Category {
    let mut rng = StdRng::seed_from_u64(id as u64);
    let roll: f64 = rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (category, weight) in CATEGORY_WEIGHTS {
        cumulative += weight;
        if roll < cumulative {
            return category;
        }
    }
    CATEGORY_WEIGHTS[CATEGORY_WEIGHTS.len() - 1].0
}

/// Draws a price within `id`'s category price tier, using the draw
/// immediately following the category draw from the same seed so the pair
/// stays deterministic together.
fn assign_price(id: usize, category: Category) -> f64 {
    let mut rng = StdRng::seed_from_u64(id as u64);
    let _category_roll: f64 = rng.random_range(0.0..1.0);
    let (min, max) = price_tier(category);
    if (max - min).abs() < f64::EPSILON {
        return min;
    }
    rng.random_range(min..max)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "CUST NO.")]
    cust_no: usize,
    #[serde(rename = "XCOORD.")]
    x: f64,
    #[serde(rename = "YCOORD.")]
    y: f64,
    #[serde(rename = "DEMAND")]
    demand: f64,
    #[serde(rename = "READY TIME")]
    ready_time: f64,
    #[serde(rename = "DUE DATE")]
    due_date: f64,
    #[serde(rename = "SERVICE TIME")]
    service_time: f64,
}

/// An immutable catalog of points of interest, loaded once and shared
/// read-only across concurrent solver instances (spec §5).
///
/// # Examples
///
/// ```no_run
/// use toptw_hga::catalog::Catalog;
///
/// let catalog = Catalog::load_csv("data/C101.csv").unwrap();
/// assert_eq!(catalog.pois()[catalog.depot_id()].id(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    pois: Vec<Poi>,
    depot_id: usize,
}

impl Catalog {
    /// Builds a catalog directly from POIs, validating the single-depot
    /// invariant of spec §3.
    ///
    /// Callers should assign each POI's id equal to its position in
    /// `pois` (the Solomon `CUST NO.` convention, depot at 0): the
    /// distance matrix built from [`Catalog::pois`] is indexed by array
    /// position, not by [`crate::poi::Poi::id`].
    pub fn from_pois(pois: Vec<Poi>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        let mut depot_id = None;
        for poi in &pois {
            if !seen.insert(poi.id()) {
                return Err(CatalogError::DuplicateId { id: poi.id() });
            }
            if poi.category() == Category::Depot {
                depot_id = Some(poi.id());
            }
        }
        let depot_id = depot_id.ok_or(CatalogError::MissingDepot)?;
        Ok(Self { pois, depot_id })
    }

    /// Loads a catalog from a Solomon-style CSV file, assigning category
    /// and price deterministically per spec §6.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new().from_path(path)?;
        let mut pois = Vec::new();
        let mut ids = HashMap::new();

        for (line, result) in reader.deserialize::<CatalogRow>().enumerate() {
            let row = result.map_err(|e| CatalogError::MalformedRow {
                line: line + 2, // header is line 1
                message: e.to_string(),
            })?;

            // File numbering is 1-based; remap to 0-based ids with id 0 as
            // the depot (spec §6).
            let id = row.cust_no.checked_sub(1).ok_or(CatalogError::MalformedRow {
                line: line + 2,
                message: format!("CUST NO. {} is not 1-based", row.cust_no),
            })?;

            if ids.insert(id, ()).is_some() {
                return Err(CatalogError::DuplicateId { id });
            }

            let time_window =
                TimeWindow::new(row.ready_time, row.due_date).ok_or(CatalogError::MalformedRow {
                    line: line + 2,
                    message: format!(
                        "invalid time window [{}, {}]",
                        row.ready_time, row.due_date
                    ),
                })?;

            let poi = if id == 0 {
                Poi::depot(row.x, row.y, time_window)
            } else {
                let category = assign_category(id);
                let price = assign_price(id, category);
                Poi::new(
                    id,
                    row.x,
                    row.y,
                    row.demand,
                    time_window,
                    row.service_time,
                    price,
                    category,
                )
            };
            pois.push(poi);
        }

        Self::from_pois(pois)
    }

    /// All POIs in the catalog, index 0 not guaranteed to be the depot —
    /// use [`Catalog::depot_id`].
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// The id of the depot POI.
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }

    /// Number of non-depot POIs.
    pub fn num_interests(&self) -> usize {
        self.pois.len().saturating_sub(1)
    }

    /// Looks up a POI by id.
    pub fn get(&self, id: usize) -> Option<&Poi> {
        self.pois.iter().find(|p| p.id() == id)
    }
}
