//! Submits one lead through the download form logic, the way the site does.
//!
//! Usage: `submit_lead <email> [download-url]`
//! The endpoint defaults to the public one; override it with `LEADS_ENDPOINT`.

use dotenvy::dotenv;
use lead_api::site::{Effect, LeadEndpointClient, LeadForm, DEFAULT_LEADS_ENDPOINT};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let Some(email) = args.next() else {
        eprintln!("usage: submit_lead <email> [download-url]");
        std::process::exit(2);
    };
    let download_url = args.next();

    let endpoint =
        env::var("LEADS_ENDPOINT").unwrap_or_else(|_| DEFAULT_LEADS_ENDPOINT.to_string());
    let client = LeadEndpointClient::new(endpoint.clone())?;
    tracing::info!("Submitting lead to {}", endpoint);

    let mut form = LeadForm::new();
    form.open_download(download_url.as_deref());
    let effects = client.submit(&mut form, &email, true).await;

    for effect in effects {
        match effect {
            Effect::SetStatus { message, .. } => println!("{}", message),
            Effect::ReportEmailValidity => println!("Invalid email: {}", email),
            Effect::OpenDownload { url } => println!("Download: {}", url),
            _ => {}
        }
    }

    tracing::info!("Final form state: {:?}", form.state());
    Ok(())
}
