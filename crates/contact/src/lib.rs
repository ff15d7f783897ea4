//! Contact inquiries: the submission model shared with the relay, the
//! required-field rules, and the client-side form state machine.

mod error;
mod form;
mod state;
mod transport;
mod types;
mod validation;

pub use error::*;
pub use form::*;
pub use state::*;
pub use transport::*;
pub use types::*;
pub use validation::{REQUIRED_FIELDS_CLIENT_MESSAGE, REQUIRED_FIELDS_RELAY_MESSAGE};
