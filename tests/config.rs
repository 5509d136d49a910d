#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use toggl2clockify::api::{ClockifyConfig, TogglConfig};
    use toggl2clockify::libs::config::{parse_project_ids, Config, GeneralConfig, ProjectMapping, TransferConfig, CONFIG_FILE_NAME};
    use toggl2clockify::libs::data_storage::{DataStorage, DEFAULT_TOGGL_API_URL};
    use toggl2clockify::libs::messages::Message;
    use toggl2clockify::libs::time_report::RoundingPolicy;

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    /// Redirects the data directory into a temporary folder.
    struct DataStorageTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for DataStorageTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            DataStorageTestContext { _temp_dir: temp_dir }
        }
    }

    impl ConfigTestContext {
        fn config_path(&self) -> PathBuf {
            self.temp_dir.path().join(CONFIG_FILE_NAME)
        }
    }

    fn complete_config() -> Config {
        Config {
            toggl: Some(TogglConfig::new("toggl-key")),
            clockify: Some(ClockifyConfig::new("clockify-key", "ws", "user")),
            transfer: TransferConfig {
                project_mappings: vec![ProjectMapping::new(vec![1, 2], "P")],
            },
            general: GeneralConfig::default(),
        }
    }

    #[test]
    fn test_general_defaults() {
        let general = GeneralConfig::default();
        assert_eq!(general.default_days_since_now, 30);
        assert!(general.should_round_time);
        assert_eq!(general.run_interval_in_hours, 8);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_missing_file_gives_default(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path()).unwrap();
        assert!(config.toggl.is_none());
        assert!(config.clockify.is_none());
        assert!(config.transfer.project_mappings.is_empty());
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        complete_config().save_to(&ctx.config_path()).unwrap();

        let config = Config::read_from(&ctx.config_path()).unwrap();

        assert_eq!(config.toggl, complete_config().toggl);
        assert_eq!(config.clockify, complete_config().clockify);
        assert_eq!(config.transfer, complete_config().transfer);
    }

    #[test_context(DataStorageTestContext)]
    #[test]
    fn test_save_and_read_in_data_storage(_ctx: &mut DataStorageTestContext) {
        complete_config().save().unwrap();
        let config = Config::read().unwrap();
        assert_eq!(config.transfer, complete_config().transfer);
        assert!(DataStorage::new().base_path().join(CONFIG_FILE_NAME).exists());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut ConfigTestContext) {
        fs::write(
            ctx.config_path(),
            r#"{
                "toggl": { "api_key": "k" },
                "transfer": { "project_mappings": [ { "destination_project_id": "P" } ] },
                "general": { "should_round_time": false }
            }"#,
        )
        .unwrap();

        let config = Config::read_from(&ctx.config_path()).unwrap();

        let toggl = config.toggl.as_ref().unwrap();
        assert_eq!(toggl.api_url, DEFAULT_TOGGL_API_URL);
        assert_eq!(toggl.start_format, "%m/%d/%Y %H:%M:%S");
        assert_eq!(config.transfer.project_mappings[0].source_project_ids, None);
        assert_eq!(config.general.default_days_since_now, 30);

        let settings = config.transfer_settings();
        assert_eq!(settings.rounding, RoundingPolicy::Exact);
        assert_eq!(settings.start_format, "%m/%d/%Y %H:%M:%S");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(ctx.config_path(), "{ not json").unwrap();
        assert!(Config::read_from(&ctx.config_path()).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(complete_config().validate().is_ok());

        let mut missing_clockify = complete_config();
        missing_clockify.clockify = None;
        assert!(missing_clockify.validate().is_err());

        let mut zero_interval = complete_config();
        zero_interval.general.run_interval_in_hours = 0;
        assert!(zero_interval.validate().is_err());

        let mut no_mappings = complete_config();
        no_mappings.transfer.project_mappings.clear();
        assert!(no_mappings.validate().is_ok());
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_env_overrides_api_keys() {
        std::env::set_var("TOGGL_API_KEY", "env-toggl");
        std::env::set_var("CLOCKIFY_API_KEY", "env-clockify");

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt().with_writer(move || writer.clone()).with_ansi(false).finish();

        let (config, quiet, created) = tracing::subscriber::with_default(subscriber, || {
            let config = complete_config().apply_env_overrides();
            let quiet = logs.contents();
            (config, quiet, Config::default().apply_env_overrides())
        });

        std::env::remove_var("TOGGL_API_KEY");
        std::env::remove_var("CLOCKIFY_API_KEY");

        assert_eq!(config.toggl.unwrap().api_key, "env-toggl");
        assert_eq!(config.clockify.unwrap().api_key, "env-clockify");
        assert_eq!(created.toggl.unwrap().api_key, "env-toggl");
        assert!(created.clockify.is_none());
        assert!(quiet.is_empty());
        assert!(logs.contents().contains(&Message::ClockifyKeyWithoutSection.to_string()));
    }

    #[test]
    fn test_parse_project_ids() {
        assert_eq!(parse_project_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_project_ids(" 42 ").unwrap(), vec![42]);
        assert!(parse_project_ids("").is_err());
        assert!(parse_project_ids(" , ").is_err());
        assert!(parse_project_ids("1,abc").is_err());
    }
}
