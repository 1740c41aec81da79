//! HTTP response building module
//!
//! Provides builders for the status codes the file server emits.

use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use super::body::{self, ResponseBody};

/// Body of every 404 response
pub const NOT_FOUND_BODY: &str = "404 (Not Found)\n";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Build 200 OK response around a body of known length
pub fn build_file_response(
    content: ResponseBody,
    content_type: &str,
    content_length: u64,
) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .body(content)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(body::empty())
        })
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<ResponseBody> {
    const MESSAGE: &str = "400 (Bad Request)\n";
    text_response(StatusCode::BAD_REQUEST, MESSAGE)
}

/// Build 403 Forbidden response, no body
pub fn build_403_response() -> Response<ResponseBody> {
    text_response(StatusCode::FORBIDDEN, "")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    text_response(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

fn text_response(status: StatusCode, message: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .header(CONTENT_LENGTH, message.len())
        .body(body::full(message))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut response = Response::new(body::full(message));
            *response.status_mut() = status;
            response
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response<ResponseBody>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_has_plain_text_body() {
        let response = build_404_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], TEXT_PLAIN);
        assert_eq!(response.headers()[CONTENT_LENGTH], "16");
        assert_eq!(body_text(response).await, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn test_403_is_empty() {
        let response = build_403_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().contains_key(CONTENT_TYPE));
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_file_response_headers() {
        let response = build_file_response(body::full("hello"), "text/plain; charset=utf-8", 5);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_LENGTH], "5");
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(body_text(response).await, "hello");
    }

    #[test]
    fn test_400() {
        assert_eq!(build_400_response().status(), StatusCode::BAD_REQUEST);
    }
}
