#[cfg(test)]
mod tests {
    use toggl2clockify::libs::messages::Message;
    use toggl2clockify::{msg_debug, msg_error, msg_info, msg_print, msg_success, msg_warning};

    fn log_last_execution(last_execution: Option<&str>) {
        match last_execution {
            Some(date) => msg_info!(Message::WatermarkCurrent(date.to_string())),
            None => msg_info!(Message::WatermarkNotSet),
        }
    }

    #[test]
    fn test_macros_are_expressions() {
        log_last_execution(Some("2024-01-05 10:00:00"));
        log_last_execution(None);

        let level = 3;
        match level {
            0 => msg_print!(Message::TransferExecuting),
            1 => msg_success!(Message::WatermarkReset),
            2 => msg_warning!(Message::NoProjectMappings),
            3 => msg_error!(Message::InvalidLookBack(level)),
            _ => msg_debug!(Message::WatermarkNotSet),
        }
    }

    #[test]
    fn test_message_texts() {
        assert_eq!(Message::WatermarkCurrent("2024-01-05 10:00:00".to_string()).to_string(), "Last execution: 2024-01-05 10:00:00");
        assert_eq!(Message::InvalidLookBack(-3).to_string(), "A look-back of -3 day(s) is out of range");
        assert!(Message::ClockifyKeyWithoutSection.to_string().contains("CLOCKIFY_API_KEY"));
    }
}
