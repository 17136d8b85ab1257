//! External service integrations.

pub mod brevo_client {
    pub use crate::brevo_client::*;
}
