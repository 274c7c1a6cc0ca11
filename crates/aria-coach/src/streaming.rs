/// Converts model stream events into coach events.
///
/// Returns `None` for events the client should not see.
pub trait StreamAdapter {
    type ProviderEvent;
    type CoachEvent;

    fn adapt(&self, event: Self::ProviderEvent) -> Option<Self::CoachEvent>;
}

/// Passes through reply text, drops completion markers (the coach emits its
/// own `Done` once the transcript is updated)
pub struct ChatStreamAdapter;

impl StreamAdapter for ChatStreamAdapter {
    type ProviderEvent = aria_llm::StreamEvent;
    type CoachEvent = aria_types::CoachEvent;

    fn adapt(&self, event: Self::ProviderEvent) -> Option<Self::CoachEvent> {
        match event {
            aria_llm::StreamEvent::Message { content } if !content.is_empty() => {
                Some(aria_types::CoachEvent::Message { content })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_filters_done() {
        let adapter = ChatStreamAdapter;
        assert!(adapter
            .adapt(aria_llm::StreamEvent::Done { finish_reason: None })
            .is_none());
        assert_eq!(
            adapter.adapt(aria_llm::StreamEvent::Message { content: "Hi".into() }),
            Some(aria_types::CoachEvent::Message { content: "Hi".into() })
        );
    }
}
