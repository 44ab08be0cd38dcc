//! Exercises the client against a throwaway local HTTP server.

use branchen_geo::Coordinate;
use branchen_geocoding::{ApiError, ClientConfig, NominatimClient, ReverseGeocoder};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one request with the given status line and body, returning
/// the raw request head it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });

    (base_url, handle)
}

fn client_for(base_url: &str) -> NominatimClient {
    let config = ClientConfig::default()
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    NominatimClient::with_config(config).unwrap()
}

#[tokio::test]
async fn reverse_sends_query_and_identifies_client() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"place_id":1,"display_name":"Mitte, Berlin","address":{"suburb":"Mitte","city":"Berlin"}}"#,
    )
    .await;

    let client = client_for(&base_url);
    let place = ReverseGeocoder::reverse(&client, Coordinate::new(52.5, 13.4)).await.unwrap();
    assert_eq!(place.label().as_deref(), Some("Berlin (Mitte)"));

    let head = server.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /reverse?lat=52.5&lon=13.4&format=json&addressdetails=1&zoom=14 "));
    assert!(head.contains("user-agent: gelbeseitenapp/1.0"));
    assert!(head.contains("x-request-id: "));
}

#[tokio::test]
async fn reverse_reports_error_status_without_json() {
    let (base_url, server) = serve_once("503 Service Unavailable", "<html>busy</html>").await;

    let err = client_for(&base_url)
        .reverse(Coordinate::new(48.1372, 11.5756))
        .await
        .unwrap_err();
    assert!(err.is_server_error(), "{err}");
    server.await.unwrap();
}

#[tokio::test]
async fn reverse_decodes_json_body_of_error_status() {
    let (base_url, server) = serve_once(
        "400 Bad Request",
        r#"{"error":{"code":400,"message":"Parameter 'lat' must be a number."}}"#,
    )
    .await;

    let place = client_for(&base_url)
        .reverse(Coordinate::new(48.1372, 11.5756))
        .await
        .unwrap();
    assert!(!place.is_resolved());
    assert_eq!(place.error.as_deref(), Some("Parameter 'lat' must be a number."));
    server.await.unwrap();
}

#[tokio::test]
async fn reverse_rejects_malformed_json() {
    let (base_url, server) = serve_once("200 OK", "<html>not json</html>").await;

    let err = client_for(&base_url)
        .reverse(Coordinate::new(53.5511, 9.9937))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Json(_)), "{err}");
    server.await.unwrap();
}

#[tokio::test]
async fn reverse_unresolvable_location_is_not_an_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"error":"Unable to geocode"}"#).await;

    let place = client_for(&base_url)
        .reverse(Coordinate::new(54.5, 4.0))
        .await
        .unwrap();
    assert!(!place.is_resolved());
    server.await.unwrap();
}
