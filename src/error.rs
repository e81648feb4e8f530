//! Error taxonomy for catalog ingestion and solving.

use thiserror::Error;

/// Errors from [`crate::catalog::Catalog::load_csv`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The underlying file could not be opened or read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader failed to open or parse the file at the structural
    /// level (header mismatch, encoding, etc.), distinct from a single
    /// malformed row.
    #[error("failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row could not be parsed or deserialized into a POI record.
    #[error("malformed catalog row at line {line}: {message}")]
    MalformedRow {
        /// 1-based line number in the source file.
        line: usize,
        /// A human-readable description of what went wrong.
        message: String,
    },

    /// Two rows mapped to the same 0-based POI id.
    #[error("duplicate POI id {id} in catalog")]
    DuplicateId {
        /// The id that appeared more than once.
        id: usize,
    },

    /// The catalog has no row that maps to customer number 0 (the depot).
    #[error("catalog is missing a depot (customer number 0)")]
    MissingDepot,
}

/// Errors surfaced at the solver boundary (spec §7).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SolverError {
    /// Preferences failed cross-field validation, or `start_node_id` is not
    /// present in the catalog. The solver never runs.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// A human-readable description of the violated constraint.
        reason: String,
    },

    /// The catalog has no non-depot POIs to visit.
    #[error("catalog has no non-depot points of interest")]
    EmptyCatalog,

    /// The best individual the evolutionary loop ever produced visits no
    /// interior POIs. Not a failure of the solver's contract — it always
    /// returns *something* — but callers typically map this to "not found".
    #[error("no feasible route visits any point of interest")]
    NoFeasibleRoute,

    /// An invariant was broken mid-run (a programming fault, not a data
    /// problem).
    #[error("internal solver fault: {reason}")]
    InternalFault {
        /// A human-readable description of the broken invariant.
        reason: String,
    },
}
