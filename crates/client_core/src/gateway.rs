//! Remote data gateway: the only component that talks HTTP.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Videogame, VideogameDraft, VideogameId},
    error::extract_error_message,
};
use tracing::debug;
use url::Url;

use crate::error::GatewayError;

#[async_trait]
pub trait VideogameGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Videogame>, GatewayError>;
    async fn create(&self, draft: &VideogameDraft) -> Result<Videogame, GatewayError>;
    /// Replaces the record with the same id. Fails with
    /// [`GatewayError::Precondition`] without touching the network if `id` is absent.
    async fn update(&self, record: &Videogame) -> Result<Videogame, GatewayError>;
    async fn delete(&self, id: VideogameId) -> Result<(), GatewayError>;
}

pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: VideogameId) -> String {
        format!("{}/{}", self.base_url, id.0)
    }
}

#[async_trait]
impl VideogameGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<Videogame>, GatewayError> {
        debug!(url = %self.base_url, "GET videogames");
        let response = self.http.get(&self.base_url).send().await?;
        let games: Vec<Videogame> = decode_json(check_status(response).await?).await?;
        if let Some(position) = games.iter().position(|game| game.id.is_none()) {
            return Err(GatewayError::Decode(format!(
                "listed videogame at index {position} has no id"
            )));
        }
        Ok(games)
    }

    async fn create(&self, draft: &VideogameDraft) -> Result<Videogame, GatewayError> {
        debug!(url = %self.base_url, title = %draft.title, "POST videogame");
        let response = self.http.post(&self.base_url).json(draft).send().await?;
        let created: Videogame = decode_json(check_status(response).await?).await?;
        if created.id.is_none() {
            return Err(GatewayError::Decode(
                "created videogame has no server-assigned id".to_string(),
            ));
        }
        Ok(created)
    }

    async fn update(&self, record: &Videogame) -> Result<Videogame, GatewayError> {
        let id = record
            .id
            .ok_or(GatewayError::Precondition("cannot update a videogame without an id"))?;
        let url = self.record_url(id);
        debug!(%url, "PUT videogame");
        let response = self.http.put(&url).json(record).send().await?;
        decode_json(check_status(response).await?).await
    }

    async fn delete(&self, id: VideogameId) -> Result<(), GatewayError> {
        let url = self.record_url(id);
        debug!(%url, "DELETE videogame");
        let response = self.http.delete(&url).send().await?;
        // The body, if any, is never read.
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        status: status.as_u16(),
        message: extract_error_message(&body, reason),
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    if response.status() == StatusCode::NO_CONTENT {
        return Err(GatewayError::Decode(
            "expected a JSON body but the server answered 204 No Content".to_string(),
        ));
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
