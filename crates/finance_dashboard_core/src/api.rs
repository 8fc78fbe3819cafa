//! Backend transport: the three calls the dashboard makes, plus the reqwest client behind them.
use crate::config::ClientConfig;
use crate::error::{DashboardError, Result};
use crate::models::TransactionsResponse;
use std::future::Future;

/// Remote source of transactions. Implemented over HTTP by [`HttpBackend`];
/// tests plug in scripted fakes.
pub trait Backend: Send + Sync {
    /// GET /transactions -> { transactions, balance }
    fn fetch_transactions(&self) -> impl Future<Output = Result<TransactionsResponse>> + Send;

    /// DELETE /transactions/{id}
    fn delete_transaction(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// POST /transactions/import (multipart field `file`)
    fn upload_file(&self, name: &str, content: Vec<u8>) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Reads the body and turns non-success statuses into `DashboardError::Status`.
async fn success_text(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(DashboardError::Status {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}

impl Backend for HttpBackend {
    async fn fetch_transactions(&self) -> Result<TransactionsResponse> {
        let url = self.url("transactions");
        log::debug!("api: GET {}", url);
        let resp = self.client.get(&url).send().await?;
        let text = success_text(resp).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("transactions/{}", urlencoding::encode(id)));
        log::debug!("api: DELETE {}", url);
        let resp = self.client.delete(&url).send().await?;
        success_text(resp).await?;
        Ok(())
    }

    async fn upload_file(&self, name: &str, content: Vec<u8>) -> Result<()> {
        let url = self.url("transactions/import");
        log::debug!("api: POST {} file={} bytes={}", url, name, content.len());
        let part = reqwest::multipart::Part::bytes(content).file_name(name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self.client.post(&url).multipart(form).send().await?;
        success_text(resp).await?;
        Ok(())
    }
}
