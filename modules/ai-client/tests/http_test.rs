//! Provider clients against a one-shot local HTTP responder.

use ai_client::{AiError, ContentModel, Gemini, ImageModel, ImageRequest, Part, Stability};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// The request line, headers (lower-cased) and body the responder received.
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: serde_json::Value,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Accept one connection, read the full request, reply with `status` and `body`.
async fn respond_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
            .collect();
        let content_length: usize = headers
            .iter()
            .find(|(k, _)| k == "content-length")
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let received =
            serde_json::from_slice(&buf[header_end..]).unwrap_or(serde_json::Value::Null);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(Captured {
            request_line,
            headers,
            body: received,
        });
    });

    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn gemini_sends_key_header_and_inline_image() {
    let (base, captured) = respond_once(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\":"},{"text":"\"Lamp\"}"}]},"finishReason":"STOP"}]}"#,
    )
    .await;

    let gemini = Gemini::new("gm-test", "gemini-test")
        .with_base_url(base)
        .with_json_output();
    let text = gemini
        .generate(vec![Part::text("Describe"), Part::image("image/png", vec![1, 2, 3])])
        .await
        .unwrap();

    assert_eq!(text, r#"{"title":"Lamp"}"#);

    let request = captured.await.unwrap();
    assert_eq!(
        request.request_line,
        "POST /models/gemini-test:generateContent HTTP/1.1"
    );
    assert_eq!(request.header("x-goog-api-key"), Some("gm-test"));
    let parts = &request.body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], "Describe");
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
    assert_eq!(parts[1]["inline_data"]["data"], "AQID");
    assert_eq!(
        request.body["generationConfig"]["responseMimeType"],
        "application/json"
    );
}

#[tokio::test]
async fn gemini_without_candidates_is_empty_response() {
    let (base, _captured) = respond_once("200 OK", r#"{"candidates":[]}"#).await;

    let err = Gemini::new("gm-test", "gemini-test")
        .with_base_url(base)
        .generate(vec![Part::text("Describe")])
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::EmptyResponse(_)), "{err}");
}

#[tokio::test]
async fn gemini_error_envelope_becomes_api_error() {
    let (base, _captured) = respond_once(
        "403 Forbidden",
        r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#,
    )
    .await;

    let err = Gemini::new("bad-key", "gemini-test")
        .with_base_url(base)
        .generate(vec![Part::text("Describe")])
        .await
        .unwrap_err();

    match err {
        AiError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("expected API error, got {other}"),
    }
}

#[tokio::test]
async fn stability_posts_photographic_payload() {
    let (base, captured) = respond_once(
        "200 OK",
        r#"{"artifacts":[{"base64":"iVBORw0KGgo=","seed":7,"finishReason":"SUCCESS"}]}"#,
    )
    .await;

    let image = Stability::new("sk-test", "sdxl-test")
        .with_base_url(base)
        .text_to_image(&ImageRequest {
            prompt: "Oak chair".into(),
            width: 960,
            height: 1024,
        })
        .await
        .unwrap();

    assert_eq!(image.base64, "iVBORw0KGgo=");
    assert_eq!(image.seed, Some(7));
    assert_eq!(image.finish_reason.as_deref(), Some("SUCCESS"));

    let request = captured.await.unwrap();
    assert_eq!(
        request.request_line,
        "POST /generation/sdxl-test/text-to-image HTTP/1.1"
    );
    assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
    assert_eq!(request.header("accept"), Some("application/json"));
    assert_eq!(request.body["text_prompts"][0]["text"], "Oak chair");
    assert_eq!(request.body["width"], 960);
    assert_eq!(request.body["style_preset"], "photographic");
}

#[tokio::test]
async fn stability_without_artifacts_is_empty_response() {
    let (base, _captured) = respond_once("200 OK", r#"{"artifacts":[]}"#).await;

    let err = Stability::new("sk-test", "sdxl-test")
        .with_base_url(base)
        .text_to_image(&ImageRequest {
            prompt: "Oak chair".into(),
            width: 1024,
            height: 1024,
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Empty response: No artifacts in API response");
}
