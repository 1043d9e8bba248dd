//! Canned provider payloads for tests.

use serde_json::json;

/// An upload response for a file in the given state. Pass `None` to
/// omit the state field, as some provider responses do.
pub fn upload_response(display_name: &str, state: Option<&str>) -> String {
    let mut file = json!({
        "name": format!("files/{}", display_name.replace('.', "-")),
        "displayName": display_name,
        "mimeType": "application/pdf",
        "sizeBytes": "1048576",
        "uri": format!("https://generativelanguage.googleapis.com/v1beta/files/{display_name}")
    });
    if let Some(state) = state {
        file["state"] = json!(state);
    }
    json!({ "file": file }).to_string()
}

/// A buffered generation response carrying a single text part.
pub fn generation_response(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 48,
            "totalTokenCount": 168
        }
    })
    .to_string()
}

/// A streaming response body: a JSON array with one response object per
/// text fragment, in order.
pub fn streaming_body(fragments: &[&str]) -> String {
    let objects: Vec<serde_json::Value> = fragments
        .iter()
        .map(|text| {
            json!({
                "candidates": [{
                    "content": {"parts": [{"text": text}], "role": "model"}
                }]
            })
        })
        .collect();
    serde_json::Value::Array(objects).to_string()
}

/// A provider error body in the standard envelope.
pub fn error_body(message: &str) -> String {
    json!({"error": {"code": 400, "message": message, "status": "INVALID_ARGUMENT"}}).to_string()
}

/// Minimal bytes that pass PDF content sniffing.
pub fn pdf_bytes() -> Vec<u8> {
    let mut bytes = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n".to_vec();
    bytes.extend_from_slice(b"trailer\n<< /Root 1 0 R >>\n%%EOF\n");
    bytes
}
