use aria_llm::{Content, ContentPart, ImageDetail, Message};

#[test]
fn test_content_text_creation() {
    let content = Content::text("Hello, world!");
    assert_eq!(content.as_text(), Some("Hello, world!"));
}

#[test]
fn test_content_from_string() {
    let content: Content = "Test".into();
    assert_eq!(content.as_text(), Some("Test"));
}

#[test]
fn test_single_text_part_reads_as_text() {
    let content = Content::Parts(vec![ContentPart::text("only text")]);
    assert_eq!(content.as_text(), Some("only text"));
    assert_eq!(content.image_count(), 0);
}

#[test]
fn test_mixed_parts_are_not_text() {
    let content = Content::Parts(vec![
        ContentPart::text("look"),
        ContentPart::image("https://example.com/a.jpg", None),
    ]);
    assert_eq!(content.as_text(), None);
    assert_eq!(content.image_count(), 1);
}

#[test]
fn test_message_roles() {
    assert_eq!(Message::system("You are helpful").role(), "system");
    assert_eq!(Message::human("Hello").role(), "user");
    assert_eq!(Message::ai("Hi there!").role(), "assistant");
}

#[test]
fn test_message_serialization_human() {
    let msg = Message::human("Hello");
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"user\""));
    assert!(json.contains("Hello"));
}

#[test]
fn test_message_deserialization() {
    let json = r#"{"role":"assistant","content":"Test"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.role(), "assistant");
    assert_eq!(msg.text(), Some("Test"));
}

#[test]
fn test_image_part_serialization() {
    let part = ContentPart::image("data:image/png;base64,AA==", Some(ImageDetail::Low));
    let json = serde_json::to_value(&part).unwrap();
    assert_eq!(json["type"], "image_url");
    assert_eq!(json["image_url"]["detail"], "low");
}
