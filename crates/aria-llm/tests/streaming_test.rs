use aria_llm::buffer_utils::{parse_sse_stream, SseLineParser};
use aria_llm::streaming::ChatChunkParser;
use aria_llm::{LlmError, StreamEvent};
use futures::{stream, StreamExt};

fn byte_stream(
    chunks: Vec<&'static str>,
) -> impl futures::Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + 'static {
    stream::iter(chunks.into_iter().map(|c| Ok(c.as_bytes().to_vec())))
}

async fn collect(chunks: Vec<&'static str>) -> Vec<anyhow::Result<StreamEvent>> {
    parse_sse_stream(byte_stream(chunks), ChatChunkParser)
        .collect()
        .await
}

#[test]
fn test_stream_event_serialization_message() {
    let event = StreamEvent::Message {
        content: "Test".to_string(),
    };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"message\""));
    assert!(json.contains("Test"));
}

#[test]
fn test_stream_event_done_skips_empty_reason() {
    let event = StreamEvent::Done { finish_reason: None };
    let json = serde_json::to_string(&event).unwrap();
    assert_eq!(json, r#"{"type":"done"}"#);
}

#[tokio::test]
async fn test_tokens_in_order_then_done() {
    let events = collect(vec![
        "data: {\"choices\":[{\"delta\":{\"content\":\"Great \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"set!\"}}]}\n\n",
        "data: [DONE]\n\n",
    ])
    .await;

    let events: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(
        events,
        vec![
            StreamEvent::Message { content: "Great ".into() },
            StreamEvent::Message { content: "set!".into() },
            StreamEvent::Done { finish_reason: None },
        ]
    );
}

#[tokio::test]
async fn test_line_split_across_chunks() {
    let events = collect(vec![
        "data: {\"choices\":[{\"del",
        "ta\":{\"content\":\"Hi\"}}]}\n",
        "\ndata: [DONE]\n",
    ])
    .await;

    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].as_ref().unwrap(),
        &StreamEvent::Message { content: "Hi".into() }
    );
}

#[tokio::test]
async fn test_comments_and_empty_deltas_are_skipped() {
    let events = collect(vec![
        ": keep-alive\n\n",
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
        "data: [DONE]\n\n",
    ])
    .await;

    let events: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(
        events,
        vec![
            StreamEvent::Done { finish_reason: Some("stop".into()) },
            StreamEvent::Done { finish_reason: None },
        ]
    );
}

#[tokio::test]
async fn test_nothing_after_done_marker() {
    let events = collect(vec![
        "data: [DONE]\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n\n",
    ])
    .await;

    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_trailing_line_without_newline() {
    let events = collect(vec!["data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}"]).await;
    assert_eq!(
        events[0].as_ref().unwrap(),
        &StreamEvent::Message { content: "tail".into() }
    );
}

#[tokio::test]
async fn test_garbage_payload_is_malformed() {
    let events = collect(vec!["data: not-json\n\n"]).await;
    let err = events[0].as_ref().unwrap_err();
    assert!(matches!(
        LlmError::classify(err),
        Some(LlmError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_transport_failure_ends_stream() {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
        Ok(b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\n".to_vec()),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        Ok(b"data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n\n".to_vec()),
    ];
    let events: Vec<_> = parse_sse_stream(stream::iter(chunks), ChatChunkParser)
        .collect()
        .await;

    assert_eq!(events.len(), 2);
    assert!(events[0].is_ok());
    assert!(matches!(
        LlmError::classify(events[1].as_ref().unwrap_err()),
        Some(LlmError::Stream(_))
    ));
}

struct UpperParser;

impl SseLineParser for UpperParser {
    fn parse_data_line(&self, data: &str) -> anyhow::Result<Vec<StreamEvent>> {
        Ok(vec![StreamEvent::Message { content: data.to_uppercase() }])
    }

    fn is_done_marker(&self, data: &str) -> bool {
        data == "END"
    }
}

#[tokio::test]
async fn test_custom_parser_strategy() {
    let events: Vec<_> = parse_sse_stream(byte_stream(vec!["data: abc\ndata: END\n"]), UpperParser)
        .collect()
        .await;

    assert_eq!(
        events[0].as_ref().unwrap(),
        &StreamEvent::Message { content: "ABC".into() }
    );
    assert_eq!(
        events[1].as_ref().unwrap(),
        &StreamEvent::Done { finish_reason: None }
    );
}
