use super::lead_form::{Effect, LeadForm, SaveResult};
use crate::errors::AppError;
use reqwest::StatusCode;
use serde_json::json;

/// Public lead endpoint the site posts to.
pub const DEFAULT_LEADS_ENDPOINT: &str = "https://site-francielimadeira.onrender.com/api/lead";

/// Browser-side view of `POST /api/lead`.
#[derive(Debug, Clone)]
pub struct LeadEndpointClient {
    client: reqwest::Client,
    endpoint: String,
}

impl LeadEndpointClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            AppError::InternalError(format!("Failed to create lead endpoint client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Posts a lead. Any 2xx is saved, 409 is a duplicate; every other status and
    /// every transport failure collapse into a plain failure.
    pub async fn save_lead(&self, email: &str, consent: bool) -> SaveResult {
        let response = match self
            .client
            .post(&self.endpoint)
            .json(&json!({ "email": email, "consent": consent }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Lead endpoint unreachable: {}", e);
                return SaveResult::failed();
            }
        };

        let status = response.status();
        if status.is_success() {
            SaveResult::saved()
        } else if status == StatusCode::CONFLICT {
            SaveResult::duplicate()
        } else {
            tracing::warn!("Lead endpoint returned {}", status);
            SaveResult::failed()
        }
    }

    /// Runs one submit through `form`, performing the network call if the form asks
    /// for it, and returns every effect the UI has to apply, in order.
    pub async fn submit(
        &self,
        form: &mut LeadForm,
        email: &str,
        consent_checked: bool,
    ) -> Vec<Effect> {
        let mut effects = form.submit(email, consent_checked);

        let post = effects.iter().find_map(|effect| match effect {
            Effect::PostLead { email, consent } => Some((email.clone(), *consent)),
            _ => None,
        });

        if let Some((email, consent)) = post {
            let result = self.save_lead(&email, consent).await;
            effects.extend(form.settle(result));
        }

        effects
    }
}
