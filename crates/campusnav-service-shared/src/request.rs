//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use campusnav_lib::{PathStatus, DEFAULT_MAX_ROUTES};

use crate::ProblemDetails;

/// Upper bound for `maxRoutes` on the alternatives endpoint.
pub const MAX_ALTERNATIVE_ROUTES: usize = 10;

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
/// The `request_id` populates the `instance` field of any returned problem.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn require(value: &str, field: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if value.trim().is_empty() {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' field is required and cannot be empty", field),
            request_id,
        )));
    }
    Ok(())
}

/// Request for the shortest route between two locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    /// Starting location id.
    pub from: String,

    /// Destination location id.
    pub to: String,

    /// Penalise walkways that are not wheelchair accessible.
    #[serde(default)]
    pub prefer_accessible: bool,
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require(&self.from, "from", request_id)?;
        require(&self.to, "to", request_id)
    }
}

/// Request for alternative routes between two locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativesRequest {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_routes: Option<usize>,
}

impl AlternativesRequest {
    /// Requested route count, defaulting when absent.
    pub fn max_routes(&self) -> usize {
        self.max_routes.unwrap_or(DEFAULT_MAX_ROUTES)
    }
}

impl Validate for AlternativesRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require(&self.from, "from", request_id)?;
        require(&self.to, "to", request_id)?;

        let max_routes = self.max_routes();
        if max_routes == 0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'maxRoutes' field must be at least 1",
                request_id,
            )));
        }
        if max_routes > MAX_ALTERNATIVE_ROUTES {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'maxRoutes' field cannot exceed {}",
                    MAX_ALTERNATIVE_ROUTES
                ),
                request_id,
            )));
        }
        Ok(())
    }
}

/// Request to open or close the walkway between two locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStatusUpdateRequest {
    pub from_id: String,
    pub to_id: String,
    pub is_available: bool,
}

impl Validate for PathStatusUpdateRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require(&self.from_id, "fromId", request_id)?;
        require(&self.to_id, "toId", request_id)
    }
}

/// Admin request to set a walkway's status by path id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPathPatchRequest {
    pub path_id: String,
    /// One of `open`, `closed`, `construction`.
    pub status: String,
}

impl AdminPathPatchRequest {
    /// Parse the requested status.
    pub fn path_status(&self, request_id: &str) -> Result<PathStatus, Box<ProblemDetails>> {
        self.status
            .parse::<PathStatus>()
            .map_err(|_| Box::new(ProblemDetails::invalid_status(&self.status, request_id)))
    }
}

impl Validate for AdminPathPatchRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require(&self.path_id, "pathId", request_id)?;
        self.path_status(request_id).map(|_| ())
    }
}
