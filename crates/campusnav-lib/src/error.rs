use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the campus navigation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Two locations in the dataset share the same identifier.
    #[error("duplicate location id: {id}")]
    DuplicateLocation { id: String },

    /// Two walkways resolve to the same path id, either explicitly or through
    /// the `{from}-{to}` fallback.
    #[error("duplicate path id: {id}; give each walkway a distinct explicit id")]
    DuplicatePath { id: String },

    /// A path segment carried a negative or non-finite length.
    #[error("path {path_id} has invalid distance {distance}; distances must be finite and non-negative")]
    InvalidDistance { path_id: String, distance: f64 },

    /// A path status string was not one of `open`, `closed` or `construction`.
    #[error("invalid path status '{value}'; expected open, closed or construction")]
    InvalidPathStatus { value: String },

    /// Raised when a location id could not be found in the campus graph.
    #[error("unknown location: {id}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for dataset JSON parsing errors.
    #[error("failed to parse campus dataset: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
