//! The mTLS-authenticated synchronous submission client.

pub mod credentials;
pub mod submission;

pub use credentials::Credentials;
pub use submission::{Environment, SubmissionClient};
