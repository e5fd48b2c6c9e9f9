//! HTTP helpers for JSON APIs with consistent timeouts and error handling.
//! Feature clients use these helpers to avoid duplicating request setup and to
//! enforce a predictable timeout policy. Authenticated calls attach the bearer
//! token provided by callers; the helpers never read credentials themselves.

use super::{config::AppConfig, errors::AppError};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::to_string;
use web_sys::AbortController;

/// Default request timeout (milliseconds) applied to all HTTP helpers.
const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Fetches JSON, attaching the bearer token when one is provided.
pub async fn get_json<T: DeserializeOwned>(path: &str, auth: Option<&str>) -> Result<T, AppError> {
    let url = build_url(path);
    let bearer = bearer_header(auth);
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::get(&url).abort_signal(Some(signal));
        if let Some((name, value)) = &bearer {
            builder = builder.header(name, value);
        }
        builder
            .build()
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Fetches JSON and returns `None` on 204 or 404. Endpoints such as
/// "my organization" answer 404 for a perfectly valid empty state.
pub async fn get_optional_json<T: DeserializeOwned>(
    path: &str,
    auth: Option<&str>,
) -> Result<Option<T>, AppError> {
    let url = build_url(path);
    let bearer = bearer_header(auth);
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::get(&url).abort_signal(Some(signal));
        if let Some((name, value)) = &bearer {
            builder = builder.header(name, value);
        }
        builder
            .build()
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_optional_json_response(response).await
}

/// Posts JSON and parses a JSON response.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    auth: Option<&str>,
) -> Result<T, AppError> {
    let url = build_url(path);
    let bearer = bearer_header(auth);
    let payload = to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::post(&url)
            .header("Content-Type", "application/json")
            .abort_signal(Some(signal));
        if let Some((name, value)) = &bearer {
            builder = builder.header(name, value);
        }
        builder
            .body(payload)
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Posts an empty body and parses a JSON response, used for accept/decline
/// style endpoints keyed entirely by their path.
pub async fn post_empty<T: DeserializeOwned>(path: &str, auth: Option<&str>) -> Result<T, AppError> {
    let url = build_url(path);
    let bearer = bearer_header(auth);
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::post(&url).abort_signal(Some(signal));
        if let Some((name, value)) = &bearer {
            builder = builder.header(name, value);
        }
        builder
            .body("")
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Puts JSON and parses a JSON response.
pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    auth: Option<&str>,
) -> Result<T, AppError> {
    let url = build_url(path);
    let bearer = bearer_header(auth);
    let payload = to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::put(&url)
            .header("Content-Type", "application/json")
            .abort_signal(Some(signal));
        if let Some((name, value)) = &bearer {
            builder = builder.header(name, value);
        }
        builder
            .body(payload)
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

fn bearer_header(auth: Option<&str>) -> Option<(String, String)> {
    auth.map(|token| ("Authorization".to_string(), format!("Bearer {token}")))
}

/// Builds a URL from the configured API base URL and the provided path.
fn build_url(path: &str) -> String {
    let config = AppConfig::load();
    let base = config.api_base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<gloo_net::http::Request, AppError>,
) -> Result<gloo_net::http::Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

/// Parses JSON responses and surfaces HTTP errors with normalized bodies.
async fn handle_json_response<T: DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<T, AppError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(normalize_error(status, &body))
    }
}

/// Parses optional JSON responses and treats 204/404 as an empty result.
async fn handle_optional_json_response<T: DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<Option<T>, AppError> {
    if response.status() == 204 {
        return Ok(None);
    }
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")));
    }
    let status = response.status();
    if status == 404 {
        return Ok(None);
    }
    let body = response.text().await.unwrap_or_default();
    Err(normalize_error(status, &body))
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    code: Option<String>,
}

/// Normalizes an error response into `AppError::Http`. The backend reports
/// business outcomes either as an explicit `code` field or as a
/// SCREAMING_SNAKE value in `error`; both end up in `code` so call sites can
/// match without string-scraping display text.
fn normalize_error(status: u16, body: &str) -> AppError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            let detail = parsed
                .error
                .clone()
                .or(parsed.message)
                .unwrap_or_else(|| "Request failed.".to_string());
            let code = parsed
                .code
                .or_else(|| parsed.error.filter(|value| looks_like_code(value)));
            AppError::Http {
                status,
                code,
                message: sanitize_body(detail),
            }
        }
        Err(_) => AppError::Http {
            status,
            code: None,
            message: sanitize_body(body.to_string()),
        },
    }
}

fn looks_like_code(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|character| character.is_ascii_uppercase() || character == '_')
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{looks_like_code, normalize_error, sanitize_body};
    use crate::app_lib::AppError;

    #[test]
    fn normalize_error_promotes_code_field() {
        let err = normalize_error(
            409,
            r#"{"error":"You already have an active subscription","code":"ACTIVE_SUBSCRIPTION_EXISTS"}"#,
        );
        assert!(err.is_code("ACTIVE_SUBSCRIPTION_EXISTS"));
        assert_eq!(
            err,
            AppError::Http {
                status: 409,
                code: Some("ACTIVE_SUBSCRIPTION_EXISTS".to_string()),
                message: "You already have an active subscription".to_string(),
            }
        );
    }

    #[test]
    fn normalize_error_promotes_screaming_snake_error_values() {
        let err = normalize_error(403, r#"{"error":"EMAIL_NOT_VERIFIED"}"#);
        assert!(err.is_code("EMAIL_NOT_VERIFIED"));
    }

    #[test]
    fn normalize_error_keeps_plain_messages_codeless() {
        let err = normalize_error(401, r#"{"error":"Invalid credentials"}"#);
        assert_eq!(err.code(), None);
    }

    #[test]
    fn normalize_error_handles_non_json_bodies() {
        let err = normalize_error(502, "Bad Gateway");
        assert_eq!(
            err,
            AppError::Http {
                status: 502,
                code: None,
                message: "Bad Gateway".to_string(),
            }
        );
    }

    #[test]
    fn not_found_is_recognizable() {
        let err = normalize_error(404, r#"{"error":"Invitation not found"}"#);
        assert!(err.is_not_found());
    }

    #[test]
    fn sanitize_body_truncates_and_defaults() {
        assert_eq!(sanitize_body("   ".to_string()), "Request failed.");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(long).len(), 200);
    }

    #[test]
    fn code_shape_detection() {
        assert!(looks_like_code("ACTIVE_SUBSCRIPTION_EXISTS"));
        assert!(!looks_like_code("Invalid credentials"));
        assert!(!looks_like_code(""));
    }
}
