//! Static file serving module
//!
//! Turns a resolution outcome into a response, streaming file bodies from disk.

use hyper::Response;
use http_body_util::BodyExt;
use tokio::fs::File;

use crate::handler::resolve::{Resolution, StaticFile};
use crate::http::{self, FileBody, ResponseBody};
use crate::logger;

/// Build the response for a resolved request path
pub async fn serve(resolution: Resolution, request_path: &str) -> Response<ResponseBody> {
    match resolution {
        Resolution::Forbidden => {
            logger::log_traversal_blocked(request_path);
            http::build_403_response()
        }
        Resolution::NotFound => http::build_404_response(),
        Resolution::Found(file) => serve_file(file).await,
    }
}

/// Open the file and stream it with its length advertised up front
pub async fn serve_file(file: StaticFile) -> Response<ResponseBody> {
    let handle = match File::open(&file.path).await {
        Ok(handle) => handle,
        Err(e) => {
            // Removed or made unreadable after resolution
            logger::log_warning(&format!(
                "Failed to open '{}': {e}",
                file.path.display()
            ));
            return http::build_404_response();
        }
    };

    let body = FileBody::new(handle, file.len, file.path).boxed_unsync();
    http::build_file_response(body, &file.content_type, file.len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
    use hyper::StatusCode;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_serve_found_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.txt");
        std::fs::write(&path, "hello").unwrap();

        let file = StaticFile {
            path,
            content_type: "text/plain".to_string(),
            len: 5,
        };
        let response = serve(Resolution::Found(file), "/b.txt").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_LENGTH], "5");
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_vanished_file_is_not_found() {
        let file = StaticFile {
            path: PathBuf::from("/definitely/not/here.txt"),
            content_type: "text/plain".to_string(),
            len: 5,
        };
        let response = serve_file(file).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_outcome_status_codes() {
        assert_eq!(
            serve(Resolution::Forbidden, "/../x").await.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            serve(Resolution::NotFound, "/x").await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
