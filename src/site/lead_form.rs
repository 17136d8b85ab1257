//! Download-gate lead form.
//!
//! The controller is a plain state machine: the UI feeds it events (`open_download`,
//! `close`, `submit`, `settle`) and performs the returned [`Effect`]s. It knows
//! nothing about the DOM.

use crate::validation::is_valid_email;

pub const STATUS_PENDING: &str = "Salvando seu email...";
pub const STATUS_FAILED: &str = "Nao foi possivel salvar seu email. Tente novamente.";
pub const STATUS_DUPLICATE: &str = "Email ja cadastrado. Abrindo o download...";
pub const STATUS_SAVED: &str = "Tudo certo! Abrindo o download...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded { duplicate: bool },
    Failed,
}

/// Styling class attached to the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Success,
    Error,
}

/// Result of the network call, as seen by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveResult {
    pub ok: bool,
    pub duplicate: bool,
}

impl SaveResult {
    pub fn saved() -> Self {
        Self {
            ok: true,
            duplicate: false,
        }
    }

    pub fn duplicate() -> Self {
        Self {
            ok: true,
            duplicate: true,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

/// Side effects the UI must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowModal,
    HideModal,
    /// Clear the email input and uncheck the consent box.
    ResetFields,
    FocusEmail,
    /// Let the email input show its native validation message.
    ReportEmailValidity,
    FocusConsent,
    SetStatus {
        message: &'static str,
        kind: StatusKind,
    },
    PostLead {
        email: String,
        consent: bool,
    },
    /// Open the download in a new browsing context (`_blank`, `noopener`).
    OpenDownload {
        url: String,
    },
}

#[derive(Debug, Clone)]
pub struct LeadForm {
    state: FormState,
    modal_open: bool,
    download_url: String,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadForm {
    pub fn new() -> Self {
        Self {
            state: FormState::Idle,
            modal_open: false,
            download_url: String::new(),
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// A download button was clicked: remember its URL and show an empty form.
    pub fn open_download(&mut self, url: Option<&str>) -> Vec<Effect> {
        self.download_url = url.unwrap_or_default().to_string();
        self.modal_open = true;
        if self.state != FormState::Submitting {
            self.state = FormState::Idle;
        }
        vec![Effect::ShowModal, Effect::ResetFields, Effect::FocusEmail]
    }

    /// Escape key or a close control. A pending submission still settles.
    pub fn close(&mut self) -> Vec<Effect> {
        if !self.modal_open {
            return Vec::new();
        }
        self.modal_open = false;
        vec![Effect::HideModal]
    }

    /// The form was submitted.
    ///
    /// Nothing reaches the network unless the email field is valid and consent is
    /// checked. A submit while another one is in flight is ignored.
    pub fn submit(&mut self, email: &str, consent_checked: bool) -> Vec<Effect> {
        if self.state == FormState::Submitting {
            tracing::debug!("Ignoring submit while a lead is already in flight");
            return Vec::new();
        }

        let email = email.trim();
        if !is_valid_email(email) {
            return vec![Effect::ReportEmailValidity];
        }
        if !consent_checked {
            return vec![Effect::FocusConsent];
        }

        self.state = FormState::Submitting;
        vec![
            Effect::SetStatus {
                message: STATUS_PENDING,
                kind: StatusKind::Neutral,
            },
            Effect::PostLead {
                email: email.to_string(),
                consent: true,
            },
        ]
    }

    /// The network call finished.
    pub fn settle(&mut self, result: SaveResult) -> Vec<Effect> {
        if self.state != FormState::Submitting {
            return Vec::new();
        }

        if !result.ok {
            self.state = FormState::Failed;
            return vec![Effect::SetStatus {
                message: STATUS_FAILED,
                kind: StatusKind::Error,
            }];
        }

        self.state = FormState::Succeeded {
            duplicate: result.duplicate,
        };
        let message = if result.duplicate {
            STATUS_DUPLICATE
        } else {
            STATUS_SAVED
        };

        let mut effects = vec![Effect::SetStatus {
            message,
            kind: StatusKind::Success,
        }];
        if !self.download_url.is_empty() {
            effects.push(Effect::OpenDownload {
                url: self.download_url.clone(),
            });
        }
        effects
    }
}
