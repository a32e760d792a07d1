//! Wire protocol
//!
//! Request parsing and response shapes for the HTTP API.

pub mod requests;
pub mod responses;

pub use requests::{ListFilesRequest, ReadFileRequest, WriteFileRequest, parse_request};
pub use responses::ErrorBody;
