//! Lista VIP signup: validation, submission and the status line.

pub mod controller;
pub mod status;
pub mod transport;
pub mod validation;

pub use controller::{FormView, SubmissionController, SubmissionState};
pub use status::{StatusKind, StatusMessage};
pub use transport::{BackendResponse, FetchTransport, FormTransport, SubmitError, TransportError};
pub use validation::{validate, SignupFields, ValidationError};
