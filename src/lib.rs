//! A hybrid genetic algorithm solver for the single-tour Team Orienteering
//! Problem with Time Windows (TOPTW).
//!
//! Given a catalog of points of interest with opening hours, entry prices
//! and category tags, and a traveler's budget, time horizon and per-category
//! interest ratings, [`solver::TopTwSolver`] evolves a population of
//! candidate routes toward one that maximizes collected interest-weighted
//! score while respecting every time window, the budget, and the return
//! deadline.
//!
//! ```no_run
//! use std::sync::Arc;
//! use toptw_hga::catalog::Catalog;
//! use toptw_hga::config::HgaConfig;
//! use toptw_hga::evolution::CancellationToken;
//! use toptw_hga::poi::Category;
//! use toptw_hga::preferences::UserPreferences;
//! use toptw_hga::solver::TopTwSolver;
//!
//! let catalog = Arc::new(Catalog::load_csv("data/C101.csv").unwrap());
//! let stars = Category::all_interests().map(|c| (c, 4)).into_iter().collect();
//! let prefs = UserPreferences::from_hours(100.0, 9.0, 18.0, 0, stars).unwrap();
//!
//! let solver = TopTwSolver::new(catalog, HgaConfig::default());
//! let mut rng = rand::rng();
//! let output = solver.solve(&prefs, &mut rng, &CancellationToken::new()).unwrap();
//! for stop in output.items() {
//!     println!("{:?} at {}", stop.category, stop.start);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod individual;
pub mod initializer;
pub mod operators;
pub mod poi;
pub mod population;
pub mod preferences;
pub mod repair;
pub mod simulation;
pub mod solver;
