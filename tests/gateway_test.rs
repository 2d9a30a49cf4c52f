//! GeminiClient のHTTPテスト
//!
//! ローカルに1回だけ応答するHTTPサーバーを立て、リクエストの形と
//! レスポンスの取り出しを検証する

use roof_ai_common::{Error, ImagePayload, Language, RoofAi};
use roof_ai_rust::config::Config;
use roof_ai_rust::gateway::GeminiClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.expect("read failed");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// 1回だけ応答するサーバー。戻り値は (APIベースURL, 受信リクエスト)
async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let request = read_request(&mut socket).await;
        let reason = if status == 200 { "OK" } else { "Internal Server Error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write failed");
        let _ = socket.shutdown().await;
        let _ = tx.send(request);
    });

    (format!("http://{}/v1beta", addr), rx)
}

fn client(base_url: String) -> GeminiClient {
    let config = Config {
        api_base_url: base_url,
        timeout_seconds: 10,
        ..Config::default()
    };
    GeminiClient::new("test-key", &config).expect("client build failed")
}

fn house() -> ImagePayload {
    ImagePayload::new("image/jpeg", "/9j/4AAQSkZJRg==")
}

// =============================================
// 解析
// =============================================

#[tokio::test]
async fn test_analyze_image_request_and_response() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"style\":\"Colonial\",\"recommendations\":[\"Tile\",\"Slate\",\"Shingle\"],\"reasoning\":\"Classic symmetry.\"}"}]}}]}"#;
    let (base, request) = serve_once(200, body).await;

    let analysis = client(base).analyze_image(&house(), Language::En).await.unwrap();
    assert_eq!(analysis.style, "Colonial");
    assert_eq!(analysis.recommendations, vec!["Tile", "Slate", "Shingle"]);

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent?key=test-key"));
    assert!(request.contains("\"responseSchema\""));
    assert!(request.contains("\"inline_data\""));
}

#[tokio::test]
async fn test_analyze_image_server_error() {
    let (base, _request) = serve_once(500, r#"{"error":{"message":"boom"}}"#).await;
    let result = client(base).analyze_image(&house(), Language::En).await;
    assert!(matches!(result, Err(Error::Analysis(_))));
}

#[tokio::test]
async fn test_analyze_image_empty_candidates() {
    let (base, _request) = serve_once(200, r#"{"candidates":[]}"#).await;
    let result = client(base).analyze_image(&house(), Language::Es).await;
    assert!(matches!(result, Err(Error::Analysis(_))));
}

// =============================================
// インサイト
// =============================================

#[tokio::test]
async fn test_insight_text() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"Metal sheds snow and reflects heat."}]}}]}"#;
    let (base, request) = serve_once(200, body).await;

    let text = client(base)
        .get_material_insight(&house(), "Colonial", "Metal Roof", Language::En)
        .await;
    assert_eq!(text, "Metal sheds snow and reflects heat.");

    let request = request.await.unwrap();
    assert!(!request.contains("generationConfig"));
}

#[tokio::test]
async fn test_insight_empty_uses_fallback() {
    let (base, _request) = serve_once(200, r#"{"candidates":[]}"#).await;
    let text = client(base)
        .get_material_insight(&house(), "Ranch", "Metal Roof", Language::En)
        .await;
    assert!(text.starts_with("Metal Roof offers superior weather protection"));
}

#[tokio::test]
async fn test_insight_failure_uses_fallback() {
    let (base, _request) = serve_once(500, "{}").await;
    let text = client(base)
        .get_material_insight(&house(), "Ranch", "Pizarra", Language::Es)
        .await;
    assert!(text.starts_with("Pizarra es conocido por su durabilidad excepcional"));
}

// =============================================
// 画像生成
// =============================================

#[tokio::test]
async fn test_generate_roof_image() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"Done."},{"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}]}}]}"#;
    let (base, request) = serve_once(200, body).await;

    let image = client(base)
        .generate_roof_image(&house(), "Metal Roof", "Charcoal Black", "Colonial")
        .await
        .unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, "iVBORw0KGgo=");

    let request = request.await.unwrap();
    assert!(request.contains("gemini-2.5-flash-image:generateContent"));
    assert!(request.contains("Charcoal Black Metal Roof"));
}

#[tokio::test]
async fn test_generate_roof_image_without_image() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"I cannot edit this photo."}]}}]}"#;
    let (base, _request) = serve_once(200, body).await;

    let result = client(base)
        .generate_roof_image(&house(), "Metal Roof", "Charcoal Black", "Colonial")
        .await;
    assert!(matches!(result, Err(Error::Generation(_))));
}
