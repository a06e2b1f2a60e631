//! Dual-channel error dispatch: admin web pages vs. JSON API bodies.

pub mod classify;
pub mod context;
pub mod descriptor;
pub mod middleware;
pub mod responder;

pub use classify::{is_admin_request, is_api_request};
pub use context::{ErrorContext, Failure, FailureKind};
pub use descriptor::{Dispatch, Page, ResponseDescriptor};
pub use responder::ErrorResponder;
