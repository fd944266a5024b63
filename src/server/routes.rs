use tracing::debug;

use crate::server::api::{self, ApiError, AppState};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn json_ok(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(state: &AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = route
        .trim_start_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    debug!(method, path, "routing request");

    let result = match (method, segments.as_slice()) {
        ("GET", ["api", "health"]) => api::health_payload().map_err(ApiError::from),
        ("GET", ["api", "species"]) => api::species_list_payload(state, path),
        ("GET", ["api", "species", number]) => api::species_detail_payload(state, number),
        ("GET", ["api", "species", number, "hp"]) => api::species_hp_payload(state, number, path),
        ("GET", ["api", "search"]) => api::search_get_payload(state),
        ("PUT", ["api", "search"]) => api::search_put_payload(state, body),
        _ => return error_response(404, "Not Found", "Route not found"),
    };

    match result {
        Ok(payload) => HttpResponse::json_ok(payload),
        Err(err) => api_error_response(&err),
    }
}

fn api_error_response(err: &ApiError) -> HttpResponse {
    match err {
        ApiError::NotFound(_) => error_response(404, "Not Found", &err.to_string()),
        ApiError::BadRequest(_) | ApiError::Parse(_) => {
            error_response(400, "Bad Request", &err.to_string())
        }
        ApiError::Data(_) | ApiError::Serde(_) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
