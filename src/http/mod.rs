//! HTTP protocol layer module
//!
//! Response bodies, content types and status responses, decoupled from path resolution.

pub mod body;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::{FileBody, ResponseBody};
pub use response::{build_400_response, build_403_response, build_404_response, build_file_response};
