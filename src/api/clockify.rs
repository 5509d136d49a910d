//! Clockify API client, the destination of the daily totals.
//!
//! Requests are authenticated with the `X-Api-Key` header. Timestamps cross
//! the wire in UTC (`2024-03-01T00:00:00Z`); the rest of the crate works in
//! local time, conversions happen here.

use super::{ensure_success, local_to_utc, utc_to_local, DestinationProvider, DestinationTimeEntry, NewTimeEntry};
use crate::libs::config::ConfigModule;
use crate::libs::data_storage::{APP_NAME, APP_VERSION, DEFAULT_CLOCKIFY_API_URL};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE_NAME: &str = "Clockify";
const API_KEY_HEADER: &str = "X-Api-Key";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
/// Largest page the time entry listing accepts.
pub const PAGE_SIZE: usize = 200;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// A time entry as returned by the Clockify API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClockifyTimeEntry {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub time_interval: TimeInterval,
}

impl From<ClockifyTimeEntry> for DestinationTimeEntry {
    fn from(entry: ClockifyTimeEntry) -> Self {
        DestinationTimeEntry {
            id: entry.id,
            project_id: entry.project_id,
            start: utc_to_local(entry.time_interval.start),
            end: entry.time_interval.end.map(utc_to_local),
        }
    }
}

/// Body of `POST /workspaces/{workspace}/time-entries`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRequest {
    pub project_id: String,
    pub start: String,
    pub end: String,
}

impl TimeEntryRequest {
    pub fn from_entry(entry: &NewTimeEntry) -> Result<Self> {
        Ok(Self {
            project_id: entry.project_id.clone(),
            start: format_timestamp(entry.start)?,
            end: format_timestamp(entry.end)?,
        })
    }
}

/// Local timestamp rendered as Clockify's UTC wire format.
pub fn format_timestamp(value: NaiveDateTime) -> Result<String> {
    Ok(local_to_utc(value)?.format(TIMESTAMP_FORMAT).to_string())
}

#[derive(Debug)]
pub struct Clockify {
    client: Client,
    config: ClockifyConfig,
}

impl Clockify {
    pub fn new(config: &ClockifyConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
                .build()
                .unwrap_or_default(),
            config: config.clone(),
        }
    }

    fn workspace_url(&self) -> String {
        format!("{}/workspaces/{}", self.config.api_url.trim_end_matches('/'), self.config.workspace_id)
    }

    pub fn user_time_entries_url(&self) -> String {
        format!("{}/user/{}/time-entries", self.workspace_url(), self.config.user_id)
    }

    pub fn time_entries_url(&self) -> String {
        format!("{}/time-entries", self.workspace_url())
    }

    pub fn time_entry_url(&self, id: &str) -> String {
        format!("{}/time-entries/{}", self.workspace_url(), id)
    }

    async fn find_page(&self, project_id: &str, start: &str, end: &str, page: usize) -> Result<Vec<ClockifyTimeEntry>> {
        let page = page.to_string();
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(self.user_time_entries_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&[
                ("start", start),
                ("end", end),
                ("project", project_id),
                ("page", page.as_str()),
                ("page-size", page_size.as_str()),
            ])
            .send()
            .await?;
        let response = ensure_success(SERVICE_NAME, response).await?;
        Ok(response.json::<Vec<ClockifyTimeEntry>>().await?)
    }
}

impl DestinationProvider for Clockify {
    async fn find_time_entries(&self, project_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<DestinationTimeEntry>> {
        let start = format_timestamp(start)?;
        let end = format_timestamp(end)?;

        let mut entries = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.find_page(project_id, &start, &end, page).await?;
            let last_page = batch.len() < PAGE_SIZE;
            entries.extend(batch.into_iter().map(DestinationTimeEntry::from));
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(entries)
    }

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<DestinationTimeEntry> {
        let request = TimeEntryRequest::from_entry(entry)?;
        let response = self
            .client
            .post(self.time_entries_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(SERVICE_NAME, response).await?;
        Ok(response.json::<ClockifyTimeEntry>().await?.into())
    }

    async fn delete_time_entry(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.time_entry_url(id))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        ensure_success(SERVICE_NAME, response).await?;
        Ok(())
    }
}

fn default_api_url() -> String {
    DEFAULT_CLOCKIFY_API_URL.to_string()
}

/// Connection settings for Clockify.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClockifyConfig {
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub workspace_id: String,
    /// Entries are listed for this user only.
    pub user_id: String,
}

impl ClockifyConfig {
    pub fn new(api_key: &str, workspace_id: &str, user_id: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_url: default_api_url(),
            workspace_id: workspace_id.to_string(),
            user_id: user_id.to_string(),
        }
    }

    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "clockify".to_string(),
            name: "Clockify".to_string(),
        }
    }

    pub fn init(config: &Option<ClockifyConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_else(|| Self::new("", "", ""));
        msg_print!(Message::ConfigModuleClockify);
        Ok(Self {
            api_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptClockifyApiKey.to_string())
                .default(config.api_key)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptClockifyApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            workspace_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptClockifyWorkspaceId.to_string())
                .default(config.workspace_id)
                .interact_text()?,
            user_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptClockifyUserId.to_string())
                .default(config.user_id)
                .interact_text()?,
        })
    }
}
