//! Live store speaking the Google Sheets v4 values API.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{CellUpdate, SheetsStore};
use crate::shared::config::{Config, ServiceAccountCredentials};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for one spreadsheet, authenticated as a service account.
///
/// Each instance fetches a fresh access token per call; nothing is pooled
/// or cached across requests. No retries: any HTTP or auth failure
/// propagates with the upstream message attached.
pub struct GoogleSheetsStore {
    http: reqwest::Client,
    spreadsheet_id: String,
    credentials: ServiceAccountCredentials,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl GoogleSheetsStore {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let credentials = config.credentials.clone().ok_or_else(|| {
            anyhow!("Kredensial service account belum diatur (GOOGLE_SERVICE_ACCOUNT_EMAIL / GOOGLE_PRIVATE_KEY)")
        })?;
        if config.spreadsheet.id.trim().is_empty() {
            return Err(anyhow!("SPREADSHEET_ID belum diatur"));
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        tracing::debug!(
            "Sheets client ready (account: {}, client id: {}, project: {})",
            credentials.client_email,
            credentials.client_id.as_deref().unwrap_or("-"),
            credentials.project_id.as_deref().unwrap_or("-")
        );
        Ok(Self {
            http,
            spreadsheet_id: config.spreadsheet.id.trim().to_string(),
            credentials,
        })
    }

    /// Exchange a signed service-account assertion for an access token
    async fn access_token(&self) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.credentials.client_email,
            scope: SHEETS_SCOPE,
            aud: TOKEN_URL,
            iat: now,
            exp: now + 3600,
        };
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .context("Invalid service account private key")?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .context("Failed to sign service account JWT")?;

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("Token exchange request failed")?;
        let response = expect_success(response, "Token exchange").await?;
        let token: TokenResponse = response
            .json()
            .await
            .context("Token exchange returned invalid JSON")?;
        Ok(token.access_token)
    }

    fn values_url(&self, range_ref: &str) -> String {
        format!(
            "{}/{}/values/{}",
            SHEETS_API_BASE,
            self.spreadsheet_id,
            urlencoding::encode(range_ref)
        )
    }
}

#[async_trait]
impl SheetsStore for GoogleSheetsStore {
    async fn get_rows(&self, worksheet: &str, range: &str) -> anyhow::Result<Vec<Vec<String>>> {
        let token = self.access_token().await?;
        let range_ref = format!("{}!{}", worksheet, range);
        let response = self
            .http
            .get(self.values_url(&range_ref))
            .bearer_auth(&token)
            .send()
            .await
            .with_context(|| format!("values.get failed for {}", range_ref))?;
        let response = expect_success(response, "values.get").await?;
        let body: ValuesResponse = response
            .json()
            .await
            .context("values.get returned invalid JSON")?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> anyhow::Result<()> {
        let token = self.access_token().await?;
        let range_ref = format!("{}!A1", worksheet);
        let url = format!("{}:append", self.values_url(&range_ref));
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .with_context(|| format!("values.append failed for {}", worksheet))?;
        expect_success(response, "values.append").await?;
        Ok(())
    }

    async fn update_cells(
        &self,
        worksheet: &str,
        updates: Vec<CellUpdate>,
    ) -> anyhow::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let token = self.access_token().await?;
        let data: Vec<serde_json::Value> = updates
            .iter()
            .map(|update| {
                json!({
                    "range": format!("{}!{}", worksheet, update.a1),
                    "values": [[update.value]],
                })
            })
            .collect();
        let url = format!(
            "{}/{}/values:batchUpdate",
            SHEETS_API_BASE, self.spreadsheet_id
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .json(&json!({
                "valueInputOption": "USER_ENTERED",
                "data": data,
            }))
            .send()
            .await
            .with_context(|| format!("values.batchUpdate failed for {}", worksheet))?;
        expect_success(response, "values.batchUpdate").await?;
        Ok(())
    }
}

/// Fail with the upstream body attached when the API answers non-2xx
async fn expect_success(
    response: reqwest::Response,
    what: &str,
) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("{} failed (HTTP {}): {}", what, status.as_u16(), body))
}

// FORMATTED_VALUE reads normally come back as strings, but the API may
// still hand back bare numbers and booleans
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
