//! Integration tests for the subtitle download flow.
//!
//! These tests verify the download-and-unpack pipeline, including the
//! bounded retry loop, against a mock HTTP server serving zip payloads.

use std::io::{Cursor, Write};

use subx_provider::{CancelFlag, RetryPolicy, SubtitleProvider};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

mod support;
use support::{StubCatalog, provider_against};

const TOKEN: &str = "test-token";

/// Builds an in-memory zip archive from `(entry name, content)` pairs.
fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(content).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

#[tokio::test]
async fn test_fetch_extracts_first_archive_entry() {
    let mock_server = MockServer::start().await;
    let subtitle = vec![b's'; 59526];
    let archive = build_zip(&[("Resident.Alien.S02E05.srt", subtitle.as_slice())]);

    Mock::given(method("GET"))
        .and(path("/subtitles/801288/download"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(archive, "application/zip"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_against(&mock_server.uri(), TOKEN, StubCatalog::unresolved());
    let response = provider.fetch("801288", &CancelFlag::new()).await;

    assert_eq!(response.stream.len(), 59526);
    assert_eq!(response.format, "srt");
    assert_eq!(response.language_code, "ES");
    assert!(!response.is_forced);
}

#[tokio::test]
async fn test_fetch_retries_after_server_errors() {
    let mock_server = MockServer::start().await;
    let archive = build_zip(&[("subtitle.srt", b"contenido" as &[u8])]);

    Mock::given(method("GET"))
        .and(path("/subtitles/694326/download"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subtitles/694326/download"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(archive, "application/zip"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_against(&mock_server.uri(), TOKEN, StubCatalog::unresolved());
    let response = provider.fetch("694326", &CancelFlag::new()).await;

    assert_eq!(response.stream, b"contenido");
}

#[tokio::test]
async fn test_fetch_exhausted_retries_yield_empty_stream_with_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subtitles/999/download"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let provider = provider_against(&mock_server.uri(), TOKEN, StubCatalog::unresolved())
        .with_retry_policy(RetryPolicy::with_max_attempts(3));
    let response = provider.fetch("999", &CancelFlag::new()).await;

    assert!(response.stream.is_empty(), "exhausted retries must yield empty stream");
    assert_eq!(response.format, "srt");
    assert_eq!(response.language_code, "ES");

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3, "one request per configured attempt");
}

#[tokio::test]
async fn test_fetch_default_policy_stops_after_ten_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subtitles/999/download"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let provider = provider_against(&mock_server.uri(), TOKEN, StubCatalog::unresolved());
    let response = provider.fetch("999", &CancelFlag::new()).await;

    assert!(response.stream.is_empty());
    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 10);
}

#[tokio::test]
async fn test_fetch_resource_fork_only_archive_is_empty_success() {
    let mock_server = MockServer::start().await;
    let archive = build_zip(&[("__MACOSX/._subtitle.srt", b"junk" as &[u8])]);

    Mock::given(method("GET"))
        .and(path("/subtitles/7/download"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(archive, "application/zip"))
        .mount(&mock_server)
        .await;

    let provider = provider_against(&mock_server.uri(), TOKEN, StubCatalog::unresolved());
    let response = provider.fetch("7", &CancelFlag::new()).await;

    assert!(response.stream.is_empty());
    // An empty archive is a successful attempt, not a retryable failure.
    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_fetch_unreadable_archive_counts_as_failed_attempt() {
    let mock_server = MockServer::start().await;
    let archive = build_zip(&[("subtitle.srt", b"real" as &[u8])]);

    Mock::given(method("GET"))
        .and(path("/subtitles/8/download"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not an archive"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subtitles/8/download"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(archive, "application/zip"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_against(&mock_server.uri(), TOKEN, StubCatalog::unresolved());
    let response = provider.fetch("8", &CancelFlag::new()).await;

    assert_eq!(response.stream, b"real");
}

#[tokio::test]
async fn test_cancelled_fetch_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = provider_against(&mock_server.uri(), TOKEN, StubCatalog::unresolved());
    let cancel = CancelFlag::new();
    cancel.cancel();
    let response = provider.fetch("1", &cancel).await;

    assert!(response.stream.is_empty());
    assert_eq!(response.format, "srt");

    let received = mock_server.received_requests().await.unwrap();
    assert!(received.is_empty());
}
