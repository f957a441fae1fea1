use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use ripple_core::{CoreError, StorageConfig, StorageError};

use crate::ObjectStore;

/// Path-style client for an S3-compatible object store (Garage, MinIO).
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: Url,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self, CoreError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|_| StorageError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
            })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            bucket: config.bucket.clone(),
        })
    }

    fn object_url(&self, key: &str) -> Result<Url, CoreError> {
        self.endpoint
            .join(&format!("{}/{}", self.bucket, key))
            .map_err(|_| {
                StorageError::InvalidEndpoint {
                    endpoint: format!("{}/{}/{}", self.endpoint, self.bucket, key),
                }
                .into()
            })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let url = self.object_url(key)?;
        let response = self.client.get(url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.text().await?)),
            StatusCode::NOT_FOUND => {
                debug!("Object not found: {}", key);
                Ok(None)
            }
            status => Err(StorageError::RequestFailed {
                key: key.to_string(),
                status: status.as_u16(),
            }
            .into()),
        }
    }

    async fn put(&self, key: &str, body: String) -> Result<(), CoreError> {
        let url = self.object_url(key)?;
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::RequestFailed {
                key: key.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        Ok(())
    }
}
