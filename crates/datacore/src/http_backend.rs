//! REST + server-sent-events client for a Datacore server.

use std::time::Duration;

use async_trait::async_trait;
use datacore_core::backend::Project;
use datacore_core::contract::changelog::{ChangelogDraft, ChangelogEntry};
use datacore_core::contract::fuel::{FuelDraft, FuelEntry};
use datacore_core::contract::infra::{Container, Host, HostDraft, Service};
use datacore_core::contract::kanban::{ColumnUpdate, KanbanColumn};
use datacore_core::contract::metrics::{MetricPoint, MetricQuery};
use datacore_core::contract::printer::{PrinterTelemetry, StreamEvent};
use datacore_core::{ApiError, ApiResult, Backend, DashboardSummary, Notification, Vehicle};
use futures::stream::{self, LocalBoxStream, StreamExt};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Error body the server sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct UnreadCount {
    count: u32,
}

pub struct HttpBackend {
    client: Client,
    /// Events use their own client: a request timeout would cut the stream.
    stream_client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::new(format!("HTTP client: {}", e)))?;
        let stream_client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::new(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            stream_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    async fn send(builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::new(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("error")));
        Err(ApiError::new(message))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = Self::send(self.request(Method::GET, path)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::new(format!("Bad response from {}: {}", path, e)))
    }

    async fn call(&self, method: Method, path: &str) -> ApiResult<()> {
        Self::send(self.request(method, path)).await?;
        Ok(())
    }

    async fn call_with<B: serde::Serialize>(&self, method: Method, path: &str, body: &B) -> ApiResult<()> {
        Self::send(self.request(method, path).json(body)).await?;
        Ok(())
    }
}

/// An event larger than this without a blank line is dropped.
const MAX_EVENT_BYTES: usize = 1 << 20;

/// Incremental `text/event-stream` decoder.
///
/// Chunks are buffered as bytes with line endings (CRLF, CR, LF) folded to
/// LF, so a terminator or a UTF-8 sequence split across chunks still decodes.
/// Only complete events are turned into text.
#[derive(Debug, Default)]
struct SseDecoder {
    buffer: Vec<u8>,
    after_cr: bool,
}

impl SseDecoder {
    fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        for &byte in chunk {
            if std::mem::take(&mut self.after_cr) && byte == b'\n' {
                continue;
            }
            if byte == b'\r' {
                self.buffer.push(b'\n');
                self.after_cr = true;
            } else {
                self.buffer.push(byte);
            }
        }

        let mut events = Vec::new();
        while let Some(end) = self.buffer.windows(2).position(|w| w == b"\n\n") {
            let block: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = parse_block(&block) {
                events.push(event);
            }
        }
        if self.buffer.len() > MAX_EVENT_BYTES {
            tracing::warn!("Dropping {} bytes of unterminated event data", self.buffer.len());
            self.buffer.clear();
        }
        events
    }

    #[cfg(test)]
    fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

/// The event in one blank-line-terminated block, if it carries `data:`.
fn parse_block(block: &[u8]) -> Option<StreamEvent> {
    let text = match std::str::from_utf8(block) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Skipping event that is not UTF-8: {}", e);
            return None;
        }
    };
    let data: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|value| value.strip_prefix(' ').unwrap_or(value))
        .collect();
    if data.is_empty() {
        return None;
    }
    match serde_json::from_str::<StreamEvent>(&data.join("\n")) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::debug!("Skipping malformed event: {}", e);
            None
        }
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn unread_count(&self) -> ApiResult<u32> {
        let body: UnreadCount = self.get("/notifications/unread-count").await?;
        Ok(body.count)
    }

    async fn notification_feed(&self) -> ApiResult<Vec<Notification>> {
        self.get("/notifications").await
    }

    async fn mark_read(&self, id: u64) -> ApiResult<()> {
        self.call(Method::POST, &format!("/notifications/{}/read", id)).await
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        self.call(Method::POST, "/notifications/read-all").await
    }

    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        self.get("/dashboard/summary").await
    }

    async fn vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        self.get("/vehicles").await
    }

    async fn fuel_entries(&self, vehicle_id: u64) -> ApiResult<Vec<FuelEntry>> {
        self.get(&format!("/vehicles/{}/fuel", vehicle_id)).await
    }

    async fn add_fuel(&self, vehicle_id: u64, draft: FuelDraft) -> ApiResult<()> {
        self.call_with(Method::POST, &format!("/vehicles/{}/fuel", vehicle_id), &draft)
            .await
    }

    async fn projects(&self) -> ApiResult<Vec<Project>> {
        self.get("/projects").await
    }

    async fn changelog(&self, project_id: u64) -> ApiResult<Vec<ChangelogEntry>> {
        self.get(&format!("/projects/{}/changelog", project_id)).await
    }

    async fn add_changelog(&self, project_id: u64, draft: ChangelogDraft) -> ApiResult<()> {
        self.call_with(Method::POST, &format!("/projects/{}/changelog", project_id), &draft)
            .await
    }

    async fn update_changelog(&self, id: u64, draft: ChangelogDraft) -> ApiResult<()> {
        self.call_with(Method::PUT, &format!("/changelog/{}", id), &draft)
            .await
    }

    async fn delete_changelog(&self, id: u64) -> ApiResult<()> {
        self.call(Method::DELETE, &format!("/changelog/{}", id)).await
    }

    async fn kanban_columns(&self, project_id: u64) -> ApiResult<Vec<KanbanColumn>> {
        self.get(&format!("/projects/{}/columns", project_id)).await
    }

    async fn update_column(&self, id: u64, update: ColumnUpdate) -> ApiResult<()> {
        self.call_with(Method::PUT, &format!("/columns/{}", id), &update)
            .await
    }

    async fn delete_column(&self, id: u64) -> ApiResult<()> {
        self.call(Method::DELETE, &format!("/columns/{}", id)).await
    }

    async fn hosts(&self) -> ApiResult<Vec<Host>> {
        self.get("/infrastructure/hosts").await
    }

    async fn add_host(&self, draft: HostDraft) -> ApiResult<()> {
        self.call_with(Method::POST, "/infrastructure/hosts", &draft)
            .await
    }

    async fn update_host(&self, id: u64, draft: HostDraft) -> ApiResult<()> {
        self.call_with(Method::PUT, &format!("/infrastructure/hosts/{}", id), &draft)
            .await
    }

    async fn delete_host(&self, id: u64) -> ApiResult<()> {
        self.call(Method::DELETE, &format!("/infrastructure/hosts/{}", id))
            .await
    }

    async fn containers(&self) -> ApiResult<Vec<Container>> {
        self.get("/infrastructure/containers").await
    }

    async fn services(&self) -> ApiResult<Vec<Service>> {
        self.get("/infrastructure/services").await
    }

    async fn metrics(&self, query: MetricQuery) -> ApiResult<Vec<MetricPoint>> {
        let response = Self::send(
            self.request(Method::GET, "/infrastructure/metrics")
                .query(&query),
        )
        .await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::new(format!("Bad metrics response: {}", e)))
    }

    async fn printer(&self) -> ApiResult<Option<PrinterTelemetry>> {
        self.get("/infrastructure/printer").await
    }

    fn printer_events(&self) -> LocalBoxStream<'static, StreamEvent> {
        let request = self
            .stream_client
            .get(self.url("/infrastructure/printer/events"))
            .header("Accept", "text/event-stream");

        stream::once(async move {
            match Self::send(request).await {
                Ok(response) => Some(response),
                Err(e) => {
                    tracing::warn!("Printer event stream unavailable: {}", e);
                    None
                }
            }
        })
        .filter_map(|r| async move { r })
        .flat_map(|response| {
            stream::unfold(
                (response, SseDecoder::default()),
                |(mut response, mut decoder)| async move {
                    loop {
                        match response.chunk().await {
                            Ok(Some(bytes)) => {
                                let events = decoder.push(&bytes);
                                if !events.is_empty() {
                                    return Some((stream::iter(events), (response, decoder)));
                                }
                            }
                            Ok(None) => return None,
                            Err(e) => {
                                tracing::warn!("Printer event stream closed: {}", e);
                                return None;
                            }
                        }
                    }
                },
            )
            .flatten()
        })
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base() {
        let backend = HttpBackend::new("http://hub.local:8000/").unwrap();
        assert_eq!(backend.url("/vehicles"), "http://hub.local:8000/api/vehicles");
    }

    const PROGRESS: &str = "{\"type\":\"state_changed\",\"entity_id\":\"sensor.p1s_print_progress\",\"state\":\"43\"}";

    fn state_of(event: &StreamEvent) -> &str {
        match event {
            StreamEvent::StateChanged { state, .. } => state.as_str(),
            StreamEvent::Unknown => "",
        }
    }

    #[test]
    fn test_decoder_keeps_partial_event() {
        let mut decoder = SseDecoder::default();
        let input = format!("data: {}\n\n: ping\n\ndata: {{\"type\":\"state", PROGRESS);
        let events = decoder.push(input.as_bytes());
        assert_eq!(events.len(), 1);
        assert_eq!(state_of(&events[0]), "43");
        assert_eq!(decoder.pending(), b"data: {\"type\":\"state");
    }

    #[test]
    fn test_decoder_unknown_type() {
        let mut decoder = SseDecoder::default();
        let events = decoder.push(b"data: {\"type\":\"heartbeat\"}\n\n");
        assert_eq!(events, vec![StreamEvent::Unknown]);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_decoder_accepts_crlf_framing() {
        let mut decoder = SseDecoder::default();
        let input = format!("event: message\r\ndata: {}\r\n\r\n", PROGRESS);
        let events = decoder.push(input.as_bytes());
        assert_eq!(events.len(), 1);
        assert!(decoder.pending().is_empty());

        // CRLF pair split between chunks.
        let input = format!("data: {}\r", PROGRESS);
        assert!(decoder.push(input.as_bytes()).is_empty());
        assert_eq!(decoder.push(b"\n\r\n").len(), 1);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_decoder_joins_utf8_split_across_chunks() {
        let mut decoder = SseDecoder::default();
        let input = "data: {\"type\":\"state_changed\",\"entity_id\":\"sensor.p1s_tray_1\",\"state\":\"Bambu PLA Matte Crème\"}\n\n";
        let bytes = input.as_bytes();
        let split = input.find('è').unwrap() + 1;
        assert!(decoder.push(&bytes[..split]).is_empty());
        let events = decoder.push(&bytes[split..]);
        assert_eq!(events.len(), 1);
        assert_eq!(state_of(&events[0]), "Bambu PLA Matte Crème");
    }

    #[test]
    fn test_decoder_drops_runaway_event() {
        let mut decoder = SseDecoder::default();
        let junk = vec![b'x'; MAX_EVENT_BYTES + 1];
        assert!(decoder.push(&junk).is_empty());
        assert!(decoder.pending().is_empty());
        let input = format!("data: {}\n\n", PROGRESS);
        assert_eq!(decoder.push(input.as_bytes()).len(), 1);
    }
}
