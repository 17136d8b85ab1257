/// Lead form controller against a mocked lead endpoint
/// Covers the browser-side mapping of HTTP outcomes to status messages
use lead_api::site::lead_form::{STATUS_DUPLICATE, STATUS_FAILED, STATUS_PENDING, STATUS_SAVED};
use lead_api::site::{Effect, FormState, LeadEndpointClient, LeadForm, SaveResult, StatusKind};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOWNLOAD_URL: &str = "https://cdn.example.com/preset-pack.zip";

async fn endpoint_returning(status: u16, body: serde_json::Value) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/lead"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&mock_server)
        .await;
    mock_server
}

fn client_for(server: &MockServer) -> LeadEndpointClient {
    LeadEndpointClient::new(format!("{}/api/lead", server.uri())).unwrap()
}

#[tokio::test]
async fn test_save_lead_maps_statuses() {
    let saved = endpoint_returning(200, json!({"ok": true})).await;
    assert_eq!(
        client_for(&saved).save_lead("user@example.com", true).await,
        SaveResult::saved()
    );

    let duplicate = endpoint_returning(409, json!({"ok": true, "duplicate": true})).await;
    assert_eq!(
        client_for(&duplicate).save_lead("user@example.com", true).await,
        SaveResult::duplicate()
    );

    for status in [400, 403, 500, 502] {
        let failing = endpoint_returning(status, json!({"ok": false})).await;
        assert_eq!(
            client_for(&failing).save_lead("user@example.com", true).await,
            SaveResult::failed()
        );
    }
}

#[tokio::test]
async fn test_save_lead_unreachable_is_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/api/lead", listener.local_addr().unwrap());
    drop(listener);

    let client = LeadEndpointClient::new(endpoint).unwrap();
    assert_eq!(
        client.save_lead("user@example.com", true).await,
        SaveResult::failed()
    );
}

#[tokio::test]
async fn test_full_submission_opens_download() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/lead"))
        .and(body_json(json!({"email": "user@example.com", "consent": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = LeadForm::new();
    form.open_download(Some(DOWNLOAD_URL));

    let effects = client.submit(&mut form, " user@example.com ", true).await;

    assert_eq!(form.state(), FormState::Succeeded { duplicate: false });
    assert_eq!(
        effects.first(),
        Some(&Effect::SetStatus {
            message: STATUS_PENDING,
            kind: StatusKind::Neutral
        })
    );
    assert!(effects.contains(&Effect::SetStatus {
        message: STATUS_SAVED,
        kind: StatusKind::Success
    }));
    assert_eq!(
        effects.last(),
        Some(&Effect::OpenDownload {
            url: DOWNLOAD_URL.to_string()
        })
    );
}

#[tokio::test]
async fn test_duplicate_submission_opens_download() {
    let mock_server = endpoint_returning(409, json!({"ok": true, "duplicate": true})).await;

    let mut form = LeadForm::new();
    form.open_download(Some(DOWNLOAD_URL));
    let effects = client_for(&mock_server)
        .submit(&mut form, "user@example.com", true)
        .await;

    assert_eq!(form.state(), FormState::Succeeded { duplicate: true });
    assert!(effects.contains(&Effect::SetStatus {
        message: STATUS_DUPLICATE,
        kind: StatusKind::Success
    }));
    assert!(effects.contains(&Effect::OpenDownload {
        url: DOWNLOAD_URL.to_string()
    }));
}

#[tokio::test]
async fn test_failed_submission_keeps_download_closed() {
    let mock_server = endpoint_returning(502, json!({"ok": false, "error": "brevo_error"})).await;

    let mut form = LeadForm::new();
    form.open_download(Some(DOWNLOAD_URL));
    let effects = client_for(&mock_server)
        .submit(&mut form, "user@example.com", true)
        .await;

    assert_eq!(form.state(), FormState::Failed);
    assert_eq!(
        effects.last(),
        Some(&Effect::SetStatus {
            message: STATUS_FAILED,
            kind: StatusKind::Error
        })
    );
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::OpenDownload { .. })));
}

#[tokio::test]
async fn test_unchecked_consent_never_hits_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut form = LeadForm::new();
    form.open_download(Some(DOWNLOAD_URL));
    let effects = client_for(&mock_server)
        .submit(&mut form, "user@example.com", false)
        .await;

    assert_eq!(effects, vec![Effect::FocusConsent]);
    assert_eq!(form.state(), FormState::Idle);
}
