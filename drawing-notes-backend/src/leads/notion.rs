//! Typed HTTP client for the Notion database that holds leads.

use async_trait::async_trait;
use drawing_notes_types::GenerationSummary;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{usage_entry, LeadError, LeadOutcome, LeadSink};
use crate::config::LeadConfig;

pub const NOTION_VERSION: &str = "2022-06-28";

/// Database property holding the lead's email
const EMAIL_PROPERTY: &str = "Email";
/// Title property of the database
const NAME_PROPERTY: &str = "Name";

pub struct NotionLeadClient {
    base_url: String,
    token: Option<String>,
    database_id: Option<String>,
    client: reqwest::Client,
}

// ── Notion API types ────────────────────────────────

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<PageRef>,
}

#[derive(Debug, Deserialize)]
struct PageRef {
    id: String,
}

// ── Payloads ────────────────────────────────────────

fn paragraph_block(text: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": {
            "rich_text": [{ "type": "text", "text": { "content": text } }]
        }
    })
}

fn query_by_email_body(email: &str) -> Value {
    json!({
        "filter": { "property": EMAIL_PROPERTY, "email": { "equals": email } },
        "page_size": 1
    })
}

fn create_page_body(database_id: &str, name: &str, email: &str, entry: &str) -> Value {
    // Title falls back to the email when no name was given
    let title = if name.is_empty() { email } else { name };
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            NAME_PROPERTY: { "title": [{ "text": { "content": title } }] },
            EMAIL_PROPERTY: { "email": email }
        },
        "children": [paragraph_block(entry)]
    })
}

fn append_body(entry: &str) -> Value {
    json!({ "children": [paragraph_block(entry)] })
}

// ── Client impl ─────────────────────────────────────

impl NotionLeadClient {
    pub fn new(config: &LeadConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[LEADS] Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            database_id: config.database_id.clone().filter(|d| !d.is_empty()),
            client,
        }
    }

    fn credentials(&self) -> Result<(&str, &str), LeadError> {
        match (self.token.as_deref(), self.database_id.as_deref()) {
            (Some(token), Some(db)) => Ok((token, db)),
            _ => Err(LeadError::NotConfigured),
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder, token: &str) -> Result<Value, LeadError> {
        let resp = req
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LeadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Value>().await.map_err(LeadError::from)
    }

    /// Find the page whose email property equals `email` exactly
    async fn find_by_email(&self, token: &str, database_id: &str, email: &str) -> Result<Option<String>, LeadError> {
        let req = self
            .client
            .post(format!("{}/v1/databases/{}/query", self.base_url, database_id))
            .json(&query_by_email_body(email));

        let value = self.send(req, token).await?;
        let parsed: QueryResponse = serde_json::from_value(value)
            .map_err(|e| LeadError::Malformed(format!("query response: {}", e)))?;

        Ok(parsed.results.into_iter().next().map(|p| p.id))
    }

    async fn create_page(&self, token: &str, database_id: &str, name: &str, email: &str, entry: &str) -> Result<String, LeadError> {
        let req = self
            .client
            .post(format!("{}/v1/pages", self.base_url))
            .json(&create_page_body(database_id, name, email, entry));

        let value = self.send(req, token).await?;
        let page: PageRef = serde_json::from_value(value)
            .map_err(|e| LeadError::Malformed(format!("create response: {}", e)))?;
        Ok(page.id)
    }

    async fn append_entry(&self, token: &str, page_id: &str, entry: &str) -> Result<(), LeadError> {
        let req = self
            .client
            .patch(format!("{}/v1/blocks/{}/children", self.base_url, page_id))
            .json(&append_body(entry));

        self.send(req, token).await?;
        Ok(())
    }
}

#[async_trait]
impl LeadSink for NotionLeadClient {
    async fn upsert_lead(
        &self,
        name: &str,
        email: &str,
        summary: &GenerationSummary,
    ) -> Result<LeadOutcome, LeadError> {
        let (token, database_id) = self.credentials()?;
        let entry = usage_entry(summary, chrono::Utc::now());

        match self.find_by_email(token, database_id, email).await? {
            Some(page_id) => {
                self.append_entry(token, &page_id, &entry).await?;
                log::info!("[LEADS] Appended usage entry to lead {}", page_id);
                Ok(LeadOutcome::Appended { record_id: page_id })
            }
            None => {
                let page_id = self.create_page(token, database_id, name, email, &entry).await?;
                log::info!("[LEADS] Created lead {}", page_id);
                Ok(LeadOutcome::Created { record_id: page_id })
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}
