use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode, Url};
use thiserror::Error;
use tracing::info;

use crate::config::ConsoleConfig;
use crate::models::{Batch, PendingUpload, ReportKind};

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),

	#[error("unexpected status: {0}")]
	Status(StatusCode),

	#[error("invalid api base url: {0}")]
	BaseUrl(String),

	#[error("could not save report: {0}")]
	Save(#[from] std::io::Error),
}

/// Raw access to the payments server, one method per endpoint.
/// Errors are reported as-is; normalization happens in the gateway.
#[async_trait]
pub trait BatchBackend: Send + Sync {
	async fn upload_xml(&self, file: &PendingUpload) -> Result<(), ApiError>;

	async fn list_batches(&self) -> Result<Vec<Batch>, ApiError>;

	async fn invoke_payment(&self, batch_id: &str) -> Result<(), ApiError>;

	async fn fetch_report(&self, batch_id: &str, kind: ReportKind) -> Result<Vec<u8>, ApiError>;
}

/// reqwest-backed implementation talking to the configured base address.
/// Clone is cheap (the client is Arc internally).
#[derive(Debug, Clone)]
pub struct HttpBackend {
	client: Client,
	base: Url,
}

impl HttpBackend {
	pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
		let base = Url::parse(&config.api_base).map_err(|e| ApiError::BaseUrl(e.to_string()))?;
		if base.cannot_be_a_base() {
			return Err(ApiError::BaseUrl(config.api_base.clone()));
		}
		let client = Client::builder().timeout(config.request_timeout()).build()?;
		Ok(Self { client, base })
	}

	fn url(&self, segments: &[&str]) -> Url {
		let mut url = self.base.clone();
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}
		url
	}
}

/// Mutating endpoints only count exactly 200 as success.
fn expect_ok(status: StatusCode) -> Result<(), ApiError> {
	if status == StatusCode::OK {
		Ok(())
	} else {
		Err(ApiError::Status(status))
	}
}

#[async_trait]
impl BatchBackend for HttpBackend {
	async fn upload_xml(&self, file: &PendingUpload) -> Result<(), ApiError> {
		let part = multipart::Part::bytes(file.content.clone())
			.file_name(file.display_name.clone())
			.mime_str("application/xml")?;
		let form = multipart::Form::new().part("file", part);

		let url = self.url(&["upload", "xml"]);
		info!("POST {} ({} bytes)", url, file.content.len());
		let resp = self.client.post(url).multipart(form).send().await?;
		expect_ok(resp.status())
	}

	async fn list_batches(&self) -> Result<Vec<Batch>, ApiError> {
		let url = self.url(&["batches"]);
		info!("GET {}", url);
		let resp = self.client.get(url).send().await?;
		let status = resp.status();
		if !status.is_success() {
			return Err(ApiError::Status(status));
		}
		Ok(resp.json::<Vec<Batch>>().await?)
	}

	async fn invoke_payment(&self, batch_id: &str) -> Result<(), ApiError> {
		let url = self.url(&["invoke-payment", batch_id]);
		info!("POST {}", url);
		let resp = self.client.post(url).send().await?;
		expect_ok(resp.status())
	}

	async fn fetch_report(&self, batch_id: &str, kind: ReportKind) -> Result<Vec<u8>, ApiError> {
		let url = self.url(&["reports", "batches", batch_id, kind.agg_type()]);
		info!("GET {}", url);
		let resp = self.client.get(url).send().await?;
		let status = resp.status();
		if !status.is_success() {
			return Err(ApiError::Status(status));
		}
		Ok(resp.bytes().await?.to_vec())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::BatchStatus;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn backend_for(server: &MockServer) -> HttpBackend {
		let config = ConsoleConfig { api_base: server.uri(), ..ConsoleConfig::default() };
		HttpBackend::new(&config).unwrap()
	}

	#[test]
	fn rejects_unusable_base() {
		let config = ConsoleConfig { api_base: "not a url".into(), ..ConsoleConfig::default() };
		assert!(matches!(HttpBackend::new(&config), Err(ApiError::BaseUrl(_))));

		let config = ConsoleConfig { api_base: "mailto:ops@example.com".into(), ..ConsoleConfig::default() };
		assert!(matches!(HttpBackend::new(&config), Err(ApiError::BaseUrl(_))));
	}

	#[test]
	fn builds_paths_under_base_prefix() {
		let config = ConsoleConfig { api_base: "http://host:8000/api/".into(), ..ConsoleConfig::default() };
		let backend = HttpBackend::new(&config).unwrap();
		assert_eq!(
			backend.url(&["reports", "batches", "b1", "branch"]).as_str(),
			"http://host:8000/api/reports/batches/b1/branch"
		);
	}

	#[tokio::test]
	async fn lists_batches() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/batches"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
				"_id": "b1",
				"date_created": "2023-09-21T10:15:30",
				"batch_name": "march",
				"valid_transactions": 5,
				"total_transactions": 5,
				"status": "Created"
			}])))
			.expect(1)
			.mount(&server)
			.await;

		let batches = backend_for(&server).list_batches().await.unwrap();
		assert_eq!(batches.len(), 1);
		assert_eq!(batches[0].id, "b1");
		assert_eq!(batches[0].status, BatchStatus::Created);
	}

	#[tokio::test]
	async fn list_error_status_is_reported() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/batches"))
			.respond_with(ResponseTemplate::new(503))
			.mount(&server)
			.await;

		let err = backend_for(&server).list_batches().await.unwrap_err();
		assert!(matches!(err, ApiError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
	}

	#[tokio::test]
	async fn uploads_multipart_file_field() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/upload/xml"))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let file = PendingUpload::new("march.xml", b"<root/>".to_vec());
		backend_for(&server).upload_xml(&file).await.unwrap();

		let received = server.received_requests().await.unwrap();
		let body = String::from_utf8_lossy(&received[0].body);
		assert!(body.contains("name=\"file\""));
		assert!(body.contains("filename=\"march.xml\""));
		assert!(body.contains("<root/>"));
	}

	#[tokio::test]
	async fn invoke_requires_exactly_200() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/invoke-payment/b1"))
			.respond_with(ResponseTemplate::new(202))
			.mount(&server)
			.await;

		let err = backend_for(&server).invoke_payment("b1").await.unwrap_err();
		assert!(matches!(err, ApiError::Status(s) if s == StatusCode::ACCEPTED));
	}

	#[tokio::test]
	async fn fetches_report_bytes() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/reports/batches/b1/source_account"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(b"Source Account,Total Amount\n".to_vec()))
			.mount(&server)
			.await;

		let bytes = backend_for(&server)
			.fetch_report("b1", ReportKind::BySourceAccount)
			.await
			.unwrap();
		assert_eq!(bytes, b"Source Account,Total Amount\n");
	}

	#[tokio::test]
	async fn unreachable_server_is_transport_error() {
		let config = ConsoleConfig { api_base: "http://127.0.0.1:9".into(), ..ConsoleConfig::default() };
		let err = HttpBackend::new(&config).unwrap().invoke_payment("b1").await.unwrap_err();
		assert!(matches!(err, ApiError::Transport(_)));
	}
}
