//! Integration tests for IPN verification over a real socket.
//!
//! These tests verify the end-to-end flow:
//! 1. VerifyNotificationHandler builds the postback body
//! 2. ReqwestPostback posts it to a local fake gateway
//! 3. The gateway's reply is classified and audited to disk
//!
//! The fake gateway is a bare tokio TcpListener so the exact request framing
//! can be asserted.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use paypal_standard::adapters::{FileIpnLog, ReqwestPostback};
use paypal_standard::application::{VerifyNotificationCommand, VerifyNotificationHandler};
use paypal_standard::domain::checkout::GATEWAY_PATH;
use paypal_standard::domain::notification::{IpnErrorCode, IpnMessage, VerificationStatus};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Request as seen by the fake gateway.
#[derive(Debug)]
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut buf).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        raw.extend_from_slice(&buf[..n]);
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8(raw[..header_end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .map(|(_, v)| v.parse().unwrap())
        .unwrap_or(0);

    let mut body = raw[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buf).await.unwrap();
        assert!(n > 0, "client closed before sending body");
        body.extend_from_slice(&buf[..n]);
    }

    CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

/// Serves one request, answering with `reply`, and hands back what it saw.
async fn spawn_gateway(reply: &'static str) -> (SocketAddr, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=UTF-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            reply.len(),
            reply
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        tx.send(request).ok();
    });

    (addr, rx)
}

fn gateway_url(addr: SocketAddr) -> String {
    format!("http://{addr}{GATEWAY_PATH}")
}

fn handler_for(url: String, timeout: Duration) -> VerifyNotificationHandler {
    let postback = ReqwestPostback::new(url, timeout).unwrap();
    VerifyNotificationHandler::new(Arc::new(postback))
}

fn sample_message() -> IpnMessage {
    IpnMessage::from_form_body(
        "mc_gross=19.95&payer_email=buyer%40example.com&item_name=Blue+Widget&payment_status=Completed&txn_id=61E67681CH3238416",
    )
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn verified_reply_is_verified() {
    let (addr, captured) = spawn_gateway("VERIFIED\r\n").await;

    let outcome = handler_for(gateway_url(addr), Duration::from_secs(5))
        .handle(VerifyNotificationCommand::new(sample_message()))
        .await;

    assert_eq!(outcome.status, VerificationStatus::Verified);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.response.as_deref(), Some("VERIFIED\r\n"));
    captured.await.unwrap();
}

#[tokio::test]
async fn invalid_reply_is_validation_failure() {
    let (addr, captured) = spawn_gateway("INVALID\r\n").await;

    let outcome = handler_for(gateway_url(addr), Duration::from_secs(5))
        .handle(VerifyNotificationCommand::new(sample_message()))
        .await;

    assert_eq!(outcome.status, VerificationStatus::Unverified);
    assert_eq!(outcome.error, Some(IpnErrorCode::ValidationFailed));
    captured.await.unwrap();
}

#[tokio::test]
async fn postback_request_is_framed_as_form_post() {
    let (addr, captured) = spawn_gateway("VERIFIED").await;

    handler_for(gateway_url(addr), Duration::from_secs(5))
        .handle(VerifyNotificationCommand::new(sample_message()))
        .await;
    let request = captured.await.unwrap();

    assert_eq!(request.request_line, "POST /cgi-bin/webscr HTTP/1.1");
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.header("connection"), Some("close"));
    assert_eq!(request.header("host"), Some(addr.to_string().as_str()));
    assert_eq!(
        request.header("content-length"),
        Some(request.body.len().to_string().as_str())
    );
    assert_eq!(
        request.body,
        "mc_gross=19.95&payer_email=buyer%40example.com&item_name=Blue+Widget&payment_status=Completed&txn_id=61E67681CH3238416&cmd=_notify-validate"
    );
}

#[tokio::test]
async fn legacy_charset_notification_is_posted_back_byte_for_byte() {
    let (addr, captured) = spawn_gateway("VERIFIED").await;
    let message = IpnMessage::from_form_body("first_name=Jos%E9&address_city=M%FCnchen&mc_gross=1.00");

    let outcome = handler_for(gateway_url(addr), Duration::from_secs(5))
        .handle(VerifyNotificationCommand::new(message))
        .await;
    let request = captured.await.unwrap();

    assert!(outcome.is_verified());
    assert_eq!(
        request.body,
        "first_name=Jos%E9&address_city=M%FCnchen&mc_gross=1.00&cmd=_notify-validate"
    );
}

#[tokio::test]
async fn refused_connection_is_no_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = handler_for(gateway_url(addr), Duration::from_secs(5))
        .handle(VerifyNotificationCommand::new(sample_message()))
        .await;

    assert_eq!(outcome.status, VerificationStatus::ConnectionFailed);
    assert_eq!(outcome.error_code(), Some("no_connection"));
    assert_eq!(outcome.response, None);
}

#[tokio::test]
async fn silent_gateway_times_out_as_no_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold the connection without ever answering
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let outcome = handler_for(gateway_url(addr), Duration::from_secs(1))
        .handle(VerifyNotificationCommand::new(sample_message()))
        .await;

    assert_eq!(outcome.status, VerificationStatus::ConnectionFailed);
    assert_eq!(outcome.error, Some(IpnErrorCode::NoConnection));
}

#[tokio::test]
async fn verification_is_audited_to_log_directory() {
    let (addr, captured) = spawn_gateway("VERIFIED").await;
    let log_dir = TempDir::new().unwrap();
    let log = FileIpnLog::new(log_dir.path()).unwrap();

    let outcome = handler_for(gateway_url(addr), Duration::from_secs(5))
        .with_log(Arc::new(log))
        .handle(VerifyNotificationCommand::new(sample_message()))
        .await;
    captured.await.unwrap();

    assert!(outcome.is_verified());
    let files: Vec<_> = std::fs::read_dir(log_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);

    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("PayPal_") && name.ends_with(".txt"), "{name}");

    let contents = std::fs::read_to_string(&files[0]).unwrap();
    assert!(contents.starts_with("SUCCESS\n\nVERIFIED\r\n\r\nPOST DATA:\r\n\r\n"));
    assert!(contents.contains("payer_email = buyer@example.com\r\n"));
    assert!(contents.contains("txn_id = 61E67681CH3238416\r\n"));
}

#[tokio::test]
async fn refused_connection_is_audited_as_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let log_dir = TempDir::new().unwrap();

    handler_for(gateway_url(addr), Duration::from_secs(5))
        .with_log(Arc::new(FileIpnLog::new(log_dir.path()).unwrap()))
        .handle(VerifyNotificationCommand::new(sample_message()))
        .await;

    let entry = std::fs::read_dir(log_dir.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    let contents = std::fs::read_to_string(entry.path()).unwrap();
    assert!(contents.starts_with("FAILED\r\n\r\nNo Connection\r\n\r\nPOST DATA:"));
}
