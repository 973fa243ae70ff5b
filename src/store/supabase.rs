// src/store/supabase.rs
//! [`NotesStore`] over a Supabase project's PostgREST interface.

use super::{NewNote, NotesStore, PersistedNote};
use crate::constants::{NOTES_TABLE, NOTION_CONNECTIONS_TABLE};
use crate::error::AppError;
use crate::types::{AccessToken, UserId, ValidatedUrl};
use reqwest::{header, Client, Response};
use serde::Deserialize;

/// PostgREST error body; only `message` is surfaced.
#[derive(Debug, Deserialize)]
struct StoreError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ConnectionRow {
    access_token: Option<String>,
}

/// Talks to `{url}/rest/v1` with the service role key.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
}

impl SupabaseStore {
    pub fn new(url: &ValidatedUrl, service_key: &AccessToken) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(service_key)?)
            .build()?;
        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", url.as_base()),
        })
    }

    fn create_headers(service_key: &AccessToken) -> Result<header::HeaderMap, AppError> {
        let invalid = |e: header::InvalidHeaderValue| {
            AppError::MissingConfiguration(format!(
                "SUPABASE_SERVICE_ROLE_KEY is not a valid header value: {}",
                e
            ))
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "apikey",
            header::HeaderValue::from_str(service_key.as_str()).map_err(invalid)?,
        );
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", service_key.as_str()))
                .map_err(invalid)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    /// Reads a response, mapping non-2xx statuses to [`AppError::Persistence`].
    async fn read_rows<T>(response: Response, table: &str) -> Result<Vec<T>, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<StoreError>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("HTTP {} from {}", status, table));
            log::error!("Store request on {} failed with {}: {}", table, status, message);
            return Err(AppError::Persistence { message });
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Unexpected row shape from {}: {}", table, e);
            AppError::Persistence {
                message: format!("unexpected response from {}: {}", table, e),
            }
        })
    }
}

#[async_trait::async_trait]
impl NotesStore for SupabaseStore {
    async fn notion_access_token(&self, user: &UserId) -> Result<Option<AccessToken>, AppError> {
        let url = format!("{}/{}", self.rest_url, NOTION_CONNECTIONS_TABLE);
        log::debug!("GET {} for user {}", url, user);

        let response = self
            .client
            .get(url)
            .query(&[
                ("user_id", format!("eq.{}", user.as_str())),
                ("select", "access_token".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<ConnectionRow> = Self::read_rows(response, NOTION_CONNECTIONS_TABLE).await?;
        match rows.into_iter().next().and_then(|row| row.access_token) {
            Some(token) if !token.trim().is_empty() => Ok(Some(AccessToken::new(token)?)),
            _ => Ok(None),
        }
    }

    async fn insert_note(&self, note: NewNote) -> Result<PersistedNote, AppError> {
        let url = format!("{}/{}", self.rest_url, NOTES_TABLE);
        log::debug!("POST {} for project {}", url, note.project_id);

        let response = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(&note)
            .send()
            .await?;

        let rows: Vec<PersistedNote> = Self::read_rows(response, NOTES_TABLE).await?;
        rows.into_iter().next().ok_or_else(|| AppError::Persistence {
            message: format!("{} insert returned no row", NOTES_TABLE),
        })
    }
}
