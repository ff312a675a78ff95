//! Request handlers.
//!
//! Each handler parses and validates its body, takes the engine lock for the
//! shortest span that covers the library call, and maps the outcome to a
//! [`ServiceResponse`] or an RFC 9457 [`ProblemDetails`].

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{info, warn};

use campusnav_lib::{Error as LibError, PathResult, PathStatus, RouteEngine, SegmentInfo};
use campusnav_service_shared::{
    AdminPathPatchRequest, AlternativesRequest, AppState, PathStatusUpdateRequest, ProblemDetails,
    RequestId, RouteRequest, ServiceResponse, Validate, from_lib_error,
    record_path_status_updated, record_route_calculated, record_route_distance,
    record_route_failed,
};

/// Number of "did you mean" ids attached to unknown-location problems.
const SUGGESTION_LIMIT: usize = 3;

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

impl<T> From<ProblemDetails> for ApiResponse<T> {
    fn from(problem: ProblemDetails) -> Self {
        ApiResponse::Error(problem)
    }
}

#[derive(Debug, Serialize)]
pub struct AlternativesResponse {
    pub routes: Vec<PathResult>,
}

#[derive(Debug, Serialize)]
pub struct PathStatusUpdated {
    pub updated: bool,
}

#[derive(Debug, Serialize)]
pub struct PathList {
    pub paths: Vec<SegmentInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPatched {
    pub success: bool,
    pub path_id: String,
    pub new_status: PathStatus,
    pub message: String,
}

fn parse<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: &RequestId,
) -> Result<T, ProblemDetails> {
    let Json(request) = payload
        .map_err(|rejection| ProblemDetails::bad_request(rejection.body_text(), request_id.as_str()))?;
    request.validate(request_id.as_str()).map_err(|problem| *problem)?;
    Ok(request)
}

fn check_locations(
    engine: &RouteEngine,
    ids: [&str; 2],
    request_id: &RequestId,
) -> Result<(), ProblemDetails> {
    match ids.into_iter().find(|id| !engine.contains(id)) {
        None => Ok(()),
        Some(id) => {
            let error = LibError::UnknownLocation {
                id: id.to_string(),
                suggestions: engine.suggest_locations(id, SUGGESTION_LIMIT),
            };
            Err(from_lib_error(&error, request_id.as_str()))
        }
    }
}

/// Handle `POST /api/v1/route`.
pub async fn route(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> ApiResponse<PathResult> {
    let request = match parse(payload, &request_id) {
        Ok(request) => request,
        Err(problem) => {
            record_route_failed("validation_error");
            return problem.into();
        }
    };

    info!(
        request_id = %request_id,
        from = %request.from,
        to = %request.to,
        prefer_accessible = request.prefer_accessible,
        "handling route request"
    );

    let engine = state.engine().await;
    let endpoints = [request.from.as_str(), request.to.as_str()];
    if let Err(problem) = check_locations(&engine, endpoints, &request_id) {
        record_route_failed("unknown_location");
        return problem.into();
    }

    match engine.find_shortest_path(&request.from, &request.to, request.prefer_accessible) {
        Some(route) => {
            record_route_calculated("route");
            record_route_distance(route.distance);
            info!(
                request_id = %request_id,
                hops = route.hop_count(),
                distance = route.distance,
                estimated_time = route.estimated_time,
                "route computed successfully"
            );
            ApiResponse::Success(ServiceResponse::new(route))
        }
        None => {
            record_route_failed("no_route");
            let error = LibError::RouteNotFound {
                start: request.from,
                goal: request.to,
            };
            info!(request_id = %request_id, error = %error, "no open route");
            from_lib_error(&error, request_id.as_str()).into()
        }
    }
}

/// Handle `POST /api/v1/route/alternatives`.
pub async fn alternatives(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<AlternativesRequest>, JsonRejection>,
) -> ApiResponse<AlternativesResponse> {
    let request = match parse(payload, &request_id) {
        Ok(request) => request,
        Err(problem) => {
            record_route_failed("validation_error");
            return problem.into();
        }
    };

    let engine = state.engine().await;
    let endpoints = [request.from.as_str(), request.to.as_str()];
    if let Err(problem) = check_locations(&engine, endpoints, &request_id) {
        record_route_failed("unknown_location");
        return problem.into();
    }

    let routes = engine.find_alternative_routes(&request.from, &request.to, request.max_routes());
    if routes.is_empty() {
        record_route_failed("no_route");
    } else {
        record_route_calculated("alternatives");
    }

    info!(
        request_id = %request_id,
        from = %request.from,
        to = %request.to,
        routes = routes.len(),
        "alternatives computed"
    );

    ApiResponse::Success(ServiceResponse::new(AlternativesResponse { routes }))
}

/// Handle `PUT /api/v1/paths/status`.
///
/// Unknown walkways are not an error: the response reports `updated: false`.
pub async fn update_path_status(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<PathStatusUpdateRequest>, JsonRejection>,
) -> ApiResponse<PathStatusUpdated> {
    let request = match parse(payload, &request_id) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };

    let updated = state.engine_mut().await.update_path_status(
        &request.from_id,
        &request.to_id,
        request.is_available,
    );

    let status = if request.is_available { "open" } else { "closed" };
    record_path_status_updated(status, updated);
    if updated {
        info!(
            request_id = %request_id,
            from = %request.from_id,
            to = %request.to_id,
            available = request.is_available,
            "path status updated"
        );
    } else {
        warn!(
            request_id = %request_id,
            from = %request.from_id,
            to = %request.to_id,
            "path status update ignored, no such walkway"
        );
    }

    ApiResponse::Success(ServiceResponse::new(PathStatusUpdated { updated }))
}

/// Handle `GET /api/admin/paths`.
pub async fn list_paths(State(state): State<AppState>) -> ApiResponse<PathList> {
    let paths = state.engine().await.segments().to_vec();
    ApiResponse::Success(ServiceResponse::new(PathList { paths }))
}

/// Handle `PATCH /api/admin/paths`.
pub async fn patch_path(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<AdminPathPatchRequest>, JsonRejection>,
) -> ApiResponse<PathPatched> {
    let request = match parse(payload, &request_id) {
        Ok(request) => request,
        Err(problem) => return problem.into(),
    };
    let status = match request.path_status(request_id.as_str()) {
        Ok(status) => status,
        Err(problem) => return (*problem).into(),
    };

    let applied = state
        .engine_mut()
        .await
        .set_segment_status(&request.path_id, status);
    record_path_status_updated(status.as_str(), applied);

    if !applied {
        warn!(request_id = %request_id, path_id = %request.path_id, "unknown path id");
        return ProblemDetails::unknown_path(&request.path_id, request_id.as_str()).into();
    }

    info!(
        request_id = %request_id,
        path_id = %request.path_id,
        status = %status,
        "path status set"
    );

    ApiResponse::Success(ServiceResponse::new(PathPatched {
        success: true,
        path_id: request.path_id,
        new_status: status,
        message: "Path status updated successfully".to_string(),
    }))
}
