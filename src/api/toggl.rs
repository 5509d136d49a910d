//! Toggl Track API client, the source of tracked time.
//!
//! Entries are listed for the authenticated user and filtered by project on
//! the client side. The start timestamp is handed on untouched; turning it
//! into a calendar day is up to the report fetcher, which tries the
//! configured [`TogglConfig::start_format`] and then RFC 3339.

use super::{ensure_success, SourceProvider, SourceTimeEntry};
use crate::libs::config::ConfigModule;
use crate::libs::data_storage::{APP_NAME, APP_VERSION, DEFAULT_TOGGL_API_URL};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE_NAME: &str = "Toggl";
const TIME_ENTRIES_URL: &str = "me/time_entries";
/// Toggl expects the API token as basic auth user with this literal password.
const API_TOKEN_PASSWORD: &str = "api_token";
/// `MM/dd/yyyy HH:mm:ss`
pub const DEFAULT_START_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// A time entry as returned by the Toggl API.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TogglTimeEntry {
    pub id: u64,
    #[serde(default)]
    pub project_id: Option<u64>,
    /// RFC 3339 with offset, e.g. `2024-01-05T09:00:00+00:00`.
    pub start: String,
    /// Seconds. Running timers report `null` or a negative value.
    #[serde(default)]
    pub duration: Option<i64>,
}

impl From<TogglTimeEntry> for SourceTimeEntry {
    fn from(entry: TogglTimeEntry) -> Self {
        SourceTimeEntry {
            start: entry.start,
            duration: entry.duration,
        }
    }
}

#[derive(Debug)]
pub struct Toggl {
    client: Client,
    config: TogglConfig,
}

impl Toggl {
    pub fn new(config: &TogglConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
                .build()
                .unwrap_or_default(),
            config: config.clone(),
        }
    }

    pub fn start_format(&self) -> &str {
        &self.config.start_format
    }

    /// Builds the listing URL for `[start, end)`.
    pub fn time_entries_url(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/{}?start_date={}&end_date={}",
            self.config.api_url.trim_end_matches('/'),
            TIME_ENTRIES_URL,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )
    }
}

impl SourceProvider for Toggl {
    async fn list_time_entries(&self, start: NaiveDate, end: NaiveDate, project_id: u64) -> Result<Vec<SourceTimeEntry>> {
        let url = self.time_entries_url(start, end);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.api_key, Some(API_TOKEN_PASSWORD))
            .send()
            .await?;
        let response = ensure_success(SERVICE_NAME, response).await?;
        let entries = response.json::<Vec<TogglTimeEntry>>().await?;

        Ok(select_project(entries, project_id))
    }
}

/// Keeps the entries booked on `project_id`.
pub fn select_project(entries: Vec<TogglTimeEntry>, project_id: u64) -> Vec<SourceTimeEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.project_id == Some(project_id))
        .map(SourceTimeEntry::from)
        .collect()
}

fn default_api_url() -> String {
    DEFAULT_TOGGL_API_URL.to_string()
}

fn default_start_format() -> String {
    DEFAULT_START_FORMAT.to_string()
}

/// Connection settings for Toggl.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TogglConfig {
    /// Personal API token from the Toggl profile page.
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// chrono format of the `start` field of returned entries.
    #[serde(default = "default_start_format")]
    pub start_format: String,
}

impl TogglConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_url: default_api_url(),
            start_format: default_start_format(),
        }
    }

    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "toggl".to_string(),
            name: "Toggl".to_string(),
        }
    }

    /// Interactive setup, pre-filled with `config` when present.
    pub fn init(config: &Option<TogglConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_else(|| Self::new(""));
        msg_print!(Message::ConfigModuleToggl);
        Ok(Self {
            api_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTogglApiKey.to_string())
                .default(config.api_key)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTogglApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            start_format: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTogglStartFormat.to_string())
                .default(config.start_format)
                .interact_text()?,
        })
    }
}
