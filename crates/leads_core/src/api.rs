use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{fields, Record},
    error::ApiErrorBody,
    protocol::{AccountResponse, LoginRequest, SignupRequest},
};
use tracing::{debug, info};
use url::Url;

use crate::error::ClientError;

/// The lead service's REST surface.
#[async_trait]
pub trait LeadsApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AccountResponse, ClientError>;
    async fn signup(&self, request: &SignupRequest) -> Result<AccountResponse, ClientError>;
    async fn upload(&self, record: &Record) -> Result<Record, ClientError>;
    async fn fetch(&self) -> Result<Vec<Record>, ClientError>;
    async fn update(&self, phone: &str, record: &Record) -> Result<Record, ClientError>;
    async fn delete(&self, phone: &str) -> Result<(), ClientError>;
}

pub struct HttpLeadsApi {
    http: Client,
    base_url: Url,
}

impl HttpLeadsApi {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Network(format!("failed to build http client: {err}")))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Server {
        status: status.as_u16(),
        message: ApiErrorBody::from_body(&body).message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = ensure_success(response).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

async fn read_account(response: Response) -> Result<AccountResponse, ClientError> {
    let body = ensure_success(response).await?.text().await?;
    Ok(AccountResponse::from_body(&body))
}

#[async_trait]
impl LeadsApi for HttpLeadsApi {
    async fn login(&self, request: &LoginRequest) -> Result<AccountResponse, ClientError> {
        let url = self.endpoint(&["login"])?;
        info!(email = %request.email, "logging in");
        let response = self.http.post(url).json(request).send().await?;
        read_account(response).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AccountResponse, ClientError> {
        let url = self.endpoint(&["signup"])?;
        info!(email = %request.email, "signing up");
        let response = self.http.post(url).json(request).send().await?;
        read_account(response).await
    }

    async fn upload(&self, record: &Record) -> Result<Record, ClientError> {
        let url = self.endpoint(&["upload"])?;
        let mut body = record.clone();
        body.remove(fields::CREATED_AT);
        let response = self.http.post(url).json(&body).send().await?;
        let text = ensure_success(response).await?.text().await?;
        // The stored record is preferred, but an acknowledgement without one still
        // means the lead was accepted.
        match serde_json::from_str::<Record>(&text) {
            Ok(stored) if stored.phone().is_some() => Ok(stored),
            _ => {
                debug!("upload response carried no record; keeping submitted copy");
                Ok(body)
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Record>, ClientError> {
        let url = self.endpoint(&["fetch"])?;
        let response = self.http.get(url).send().await?;
        let records: Vec<Record> = read_json(response).await?;
        debug!(records = records.len(), "fetched leads");
        Ok(records)
    }

    async fn update(&self, phone: &str, record: &Record) -> Result<Record, ClientError> {
        let url = self.endpoint(&["update", phone])?;
        let response = self.http.put(url).json(record).send().await?;
        let updated: Record = read_json(response).await?;
        if !updated.has_phone(phone) {
            return Err(ClientError::Decode(format!(
                "update response is not the record for phone {phone}"
            )));
        }
        Ok(updated)
    }

    async fn delete(&self, phone: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["delete", phone])?;
        let response = self.http.delete(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
