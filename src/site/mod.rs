//! Toolkit-independent logic behind the landing page scripts.
//!
//! - `lead_form`: download-gate form state machine.
//! - `endpoint_client`: the form's call to `POST /api/lead`.
//! - `widgets`: mobile nav menu, carousels and the FAQ accordion.

pub mod endpoint_client;
pub mod lead_form;
pub mod widgets;

pub use endpoint_client::{LeadEndpointClient, DEFAULT_LEADS_ENDPOINT};
pub use lead_form::{Effect, FormState, LeadForm, SaveResult, StatusKind};
