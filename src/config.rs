/// Origins allowed to call the API from a browser.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "https://francielimadeira.com",
    "https://www.francielimadeira.com",
];

pub const DEFAULT_BREVO_BASE_URL: &str = "https://api.brevo.com/v3";

/// Directory holding the public site assets. Kept apart from the working
/// directory so that `.env` and sources are never reachable over HTTP.
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub brevo_api_key: Option<String>,
    pub brevo_list_id: Option<i64>,
    pub brevo_base_url: String,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
}

/// Brevo credentials that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct BrevoCredentials<'a> {
    pub api_key: &'a str,
    pub list_id: i64,
}

impl Config {
    /// Loads the configuration from the process environment (and `.env`, if present).
    ///
    /// Missing Brevo credentials are not an error here: the server still starts and
    /// answers lead submissions with `server_misconfigured` until an operator fixes
    /// the environment. Malformed optional settings (`PORT`, `BREVO_BASE_URL`) do fail.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        // Never log the API key itself
        tracing::debug!(
            has_api_key = config.brevo_api_key.is_some(),
            has_list_id = config.brevo_list_id.is_some(),
            "Brevo credentials inspected"
        );
        tracing::debug!("Brevo Base URL: {}", config.brevo_base_url);
        tracing::debug!("Static dir: {}", config.static_dir);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Builds the configuration from any variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            brevo_api_key: var("BREVO_API_KEY"),
            brevo_list_id: var("BREVO_LIST_ID").and_then(|raw| parse_list_id(&raw)),
            brevo_base_url: var("BREVO_BASE_URL")
                .map(|url| {
                    let url = url.trim();
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("BREVO_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_BREVO_BASE_URL.to_string()),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            static_dir: var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }

    /// Returns the Brevo credentials when both the key and a numeric list id are present.
    pub fn brevo_credentials(&self) -> Option<BrevoCredentials<'_>> {
        match (self.brevo_api_key.as_deref(), self.brevo_list_id) {
            (Some(api_key), Some(list_id)) => Some(BrevoCredentials { api_key, list_id }),
            _ => None,
        }
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

/// Parses a list id the way a browser-side `Number()` + `Number.isInteger()` check
/// would accept it: surrounding whitespace is ignored, fractional values are rejected.
pub fn parse_list_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id);
    }
    // "7.0" is still an integer
    let value: f64 = trimmed.parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
