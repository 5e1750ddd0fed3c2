//! The SOAP/XML wire codec: encode records and queries, decode AEAT responses.

pub mod decode;
pub mod encode;
pub mod namespaces;
pub mod writer;

pub use decode::{parse_query_response, parse_submission_response};
pub use encode::{encode_query, encode_submission, SubmissionHeader};
