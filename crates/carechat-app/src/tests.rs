#[cfg(test)]
mod tests {
    use crate::facade::{load_config, turn_ran};
    use carechat_core::orchestrator::Reply;
    use carechat_types::config::{ChatConfig, DEFAULT_MODEL};
    use carechat_types::event::ReplySource;
    use carechat_types::message::{Message, Sender};
    use carechat_types::ChatError;

    // ─── Config loading Tests ────────────────────────────────

    #[test]
    fn test_load_config_defaults() {
        assert_eq!(load_config(None).unwrap(), ChatConfig::default());
        assert_eq!(load_config(Some("  ")).unwrap(), ChatConfig::default());
    }

    #[test]
    fn test_load_config_overrides() {
        let config = load_config(Some(
            r#"{"completion": {"model": "gpt-4o"}, "voice": {"lang": "en-GB"}}"#,
        ))
        .unwrap();
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.voice.lang, "en-GB");
        assert_eq!(config.greeting, ChatConfig::default().greeting);
        assert_ne!(config.completion.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_load_config_invalid_json() {
        assert!(matches!(
            load_config(Some("{not json")),
            Err(ChatError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_config_invalid_values() {
        assert!(matches!(
            load_config(Some(r#"{"greeting": ""}"#)),
            Err(ChatError::Config(_))
        ));
    }

    // ─── Turn outcome Tests ──────────────────────────────────

    #[test]
    fn test_turn_ran() {
        let reply = Reply {
            message: Message::new(3, Sender::Assistant, "ok"),
            source: ReplySource::Remote,
        };
        assert!(turn_ran(Ok(reply)));
        assert!(!turn_ran(Err(ChatError::EmptyInput)));
        assert!(!turn_ran(Err(ChatError::Busy)));
    }
}
