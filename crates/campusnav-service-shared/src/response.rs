//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful response body with a content type marker.
///
/// The payload is flattened into the top-level object, mirroring the
/// `content_type` field carried by [`crate::ProblemDetails`].
///
/// # Example
///
/// ```
/// use campusnav_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Updated {
///     updated: bool,
/// }
///
/// let response = ServiceResponse::new(Updated { updated: true });
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusnav_lib::{Coordinate, PathResult};

    #[test]
    fn test_path_result_is_flattened() {
        let result = PathResult {
            path: vec!["main".to_string(), "library".to_string()],
            distance: 150.0,
            estimated_time: 2,
            waypoints: vec![
                Coordinate { lat: 9.85, lng: 123.9167 },
                Coordinate { lat: 9.8505, lng: 123.917 },
            ],
        };
        let json = serde_json::to_value(ServiceResponse::new(result)).unwrap();

        assert_eq!(json["distance"], 150.0);
        assert_eq!(json["estimatedTime"], 2);
        assert_eq!(json["path"][1], "library");
        assert_eq!(json["content_type"], "application/json");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_response_from_trait() {
        let response: ServiceResponse<Vec<u8>> = vec![1, 2].into();
        assert_eq!(response.data, vec![1, 2]);
        assert_eq!(response.content_type, "application/json");
    }
}
