//! Configuration of the transfer service.
//!
//! The configuration lives in `config.json` inside the application data
//! directory (see [`DataStorage`]). It is split into optional sections so a
//! partially configured installation still loads:
//!
//! ```json
//! {
//!   "toggl": { "api_key": "..." },
//!   "clockify": { "api_key": "...", "workspace_id": "...", "user_id": "..." },
//!   "transfer": {
//!     "project_mappings": [
//!       { "source_project_ids": [1, 2], "destination_project_id": "P" }
//!     ]
//!   },
//!   "general": { "default_days_since_now": 30, "should_round_time": true, "run_interval_in_hours": 8 }
//! }
//! ```
//!
//! `TOGGL_API_KEY` and `CLOCKIFY_API_KEY` override the keys stored in the
//! file, which keeps secrets out of it when the service runs from a `.env`.

use super::data_storage::DataStorage;
use crate::api::toggl::DEFAULT_START_FORMAT;
use crate::api::{ClockifyConfig, TogglConfig};
use crate::libs::messages::Message;
use crate::libs::time_report::RoundingPolicy;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const TOGGL_API_KEY_ENV: &str = "TOGGL_API_KEY";
pub const CLOCKIFY_API_KEY_ENV: &str = "CLOCKIFY_API_KEY";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Source projects whose time is summed into one destination project.
///
/// Both fields are optional on disk so a broken mapping can be reported
/// when it is processed instead of rejecting the whole file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ProjectMapping {
    #[serde(default)]
    pub source_project_ids: Option<Vec<u64>>,
    #[serde(default)]
    pub destination_project_id: Option<String>,
}

impl ProjectMapping {
    pub fn new(source_project_ids: Vec<u64>, destination_project_id: &str) -> Self {
        Self {
            source_project_ids: Some(source_project_ids),
            destination_project_id: Some(destination_project_id.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct TransferConfig {
    #[serde(default)]
    pub project_mappings: Vec<ProjectMapping>,
}

/// Scheduling and report shaping.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Look-back for the very first run, when no last execution is stored.
    pub default_days_since_now: i64,
    /// Round daily totals to whole hours before writing them.
    pub should_round_time: bool,
    pub run_interval_in_hours: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            default_days_since_now: 30,
            should_round_time: true,
            run_interval_in_hours: 8,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggl: Option<TogglConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clockify: Option<ClockifyConfig>,

    #[serde(default)]
    pub transfer: TransferConfig,

    #[serde(default)]
    pub general: GeneralConfig,
}

/// Everything the transfer orchestrator needs, resolved from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransferSettings {
    pub project_mappings: Vec<ProjectMapping>,
    pub default_days_since_now: i64,
    pub rounding: RoundingPolicy,
    /// chrono format of the source entries' start timestamps.
    pub start_format: String,
}

impl From<&Config> for TransferSettings {
    fn from(config: &Config) -> Self {
        TransferSettings {
            project_mappings: config.transfer.project_mappings.clone(),
            default_days_since_now: config.general.default_days_since_now,
            rounding: RoundingPolicy::from_flag(config.general.should_round_time),
            start_format: config
                .toggl
                .as_ref()
                .map(|toggl| toggl.start_format.clone())
                .unwrap_or_else(|| DEFAULT_START_FORMAT.to_string()),
        }
    }
}

impl Config {
    /// Loads the configuration from the data directory.
    ///
    /// A missing file yields the default configuration.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Replaces API keys with the values of the environment, when set.
    ///
    /// `TOGGL_API_KEY` alone is enough for a Toggl section. Clockify also
    /// needs a workspace and a user, so its key only replaces an existing one.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(api_key) = env::var(TOGGL_API_KEY_ENV) {
            match self.toggl.as_mut() {
                Some(toggl) => toggl.api_key = api_key,
                None => self.toggl = Some(TogglConfig::new(&api_key)),
            }
        }
        if let Ok(api_key) = env::var(CLOCKIFY_API_KEY_ENV) {
            match self.clockify.as_mut() {
                Some(clockify) => clockify.api_key = api_key,
                None => msg_warning!(Message::ClockifyKeyWithoutSection),
            }
        }
        self
    }

    /// Checks that the service can start and returns the provider settings.
    ///
    /// Individual project mappings are not checked here; a broken mapping
    /// fails on its own when the transfer reaches it.
    pub fn validate(&self) -> Result<(&TogglConfig, &ClockifyConfig)> {
        if self.toggl.is_none() || self.clockify.is_none() {
            msg_info!(Message::ConfigRunInitFirst);
        }
        let toggl = self
            .toggl
            .as_ref()
            .ok_or_else(|| msg_error_anyhow!(Message::ConfigModuleMissing(TogglConfig::module().key)))?;
        let clockify = self
            .clockify
            .as_ref()
            .ok_or_else(|| msg_error_anyhow!(Message::ConfigModuleMissing(ClockifyConfig::module().key)))?;
        if self.general.run_interval_in_hours == 0 {
            msg_bail_anyhow!(Message::ConfigInvalidRunInterval);
        }
        if self.transfer.project_mappings.is_empty() {
            msg_warning!(Message::NoProjectMappings);
        }
        Ok((toggl, clockify))
    }

    pub fn transfer_settings(&self) -> TransferSettings {
        TransferSettings::from(self)
    }

    /// Interactive setup wizard, pre-filled with the current configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            TogglConfig::module(),
            ClockifyConfig::module(),
            ConfigModule {
                key: "mappings".to_string(),
                name: "Project mappings".to_string(),
            },
            ConfigModule {
                key: "general".to_string(),
                name: "General".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "toggl" => config.toggl = Some(TogglConfig::init(&config.toggl)?),
                "clockify" => config.clockify = Some(ClockifyConfig::init(&config.clockify)?),
                "mappings" => config.transfer = Self::init_mappings(&config.transfer)?,
                "general" => config.general = Self::init_general(&config.general)?,
                _ => {}
            }
        }

        Ok(config)
    }

    fn init_mappings(current: &TransferConfig) -> Result<TransferConfig> {
        msg_print!(Message::ConfigModuleMappings);

        let mut project_mappings = current.project_mappings.clone();
        if !project_mappings.is_empty()
            && Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptReplaceMappings.to_string())
                .default(false)
                .interact()?
        {
            project_mappings.clear();
        }

        loop {
            let source_ids: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSourceProjectIds.to_string())
                .validate_with(|input: &String| -> Result<(), String> {
                    parse_project_ids(input).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()?;
            let destination: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDestinationProjectId.to_string())
                .interact_text()?;
            project_mappings.push(ProjectMapping::new(parse_project_ids(&source_ids)?, destination.trim()));

            if !Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAddAnotherMapping.to_string())
                .default(false)
                .interact()?
            {
                break;
            }
        }

        msg_print!(Message::MappingAdded(project_mappings.len()));
        Ok(TransferConfig { project_mappings })
    }

    fn init_general(current: &GeneralConfig) -> Result<GeneralConfig> {
        msg_print!(Message::ConfigModuleGeneral);
        Ok(GeneralConfig {
            default_days_since_now: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDefaultDaysSinceNow.to_string())
                .default(current.default_days_since_now)
                .interact_text()?,
            should_round_time: Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptShouldRoundTime.to_string())
                .default(current.should_round_time)
                .interact()?,
            run_interval_in_hours: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRunIntervalInHours.to_string())
                .default(current.run_interval_in_hours)
                .validate_with(|hours: &u64| -> Result<(), String> {
                    if *hours == 0 {
                        Err(Message::ConfigInvalidRunInterval.to_string())
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?,
        })
    }
}

/// Parses `"1, 2,3"` into project ids. Empty input is rejected.
pub fn parse_project_ids(input: &str) -> Result<Vec<u64>> {
    let ids = input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| msg_error_anyhow!(Message::InvalidSourceProjectIds(input.to_string())))?;
    if ids.is_empty() {
        msg_bail_anyhow!(Message::InvalidSourceProjectIds(input.to_string()));
    }
    Ok(ids)
}
