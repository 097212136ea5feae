//! HTTP access to the slot store.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::debug;
use tutorcal_core::{DeleteSlotResponse, SlotError, SlotResult, TimeSlot, TimeSlotPatch};

/// Remote slot collection as seen by the client.
#[async_trait]
pub trait SlotApi: Send + Sync {
    async fn list(&self) -> SlotResult<Vec<TimeSlot>>;
    async fn get(&self, id: &str) -> SlotResult<TimeSlot>;
    async fn create(&self, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;
    async fn update(&self, id: &str, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;
    async fn delete(&self, id: &str) -> SlotResult<()>;
}

/// [`SlotApi`] over the REST endpoints under `<base_url>/slots`.
///
/// Requests use the transport's default timeout and are never retried.
#[derive(Debug, Clone)]
pub struct HttpSlotApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSlotApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn slots_url(&self) -> String {
        format!("{}/slots", self.base_url)
    }

    fn slot_url(&self, id: &str) -> String {
        format!("{}/slots/{}", self.base_url, id)
    }
}

fn transport(err: reqwest::Error) -> SlotError {
    SlotError::Transport(err.to_string())
}

/// Turns non-2xx responses into errors: 404 becomes `NotFound`, anything else `Transport`.
async fn check(response: Response) -> SlotResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        Err(SlotError::NotFound(body))
    } else {
        Err(SlotError::Transport(format!("HTTP error! status: {}: {}", status, body)))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> SlotResult<T> {
    response
        .json()
        .await
        .map_err(|err| SlotError::Transport(format!("Invalid data format received: {}", err)))
}

#[async_trait]
impl SlotApi for HttpSlotApi {
    async fn list(&self) -> SlotResult<Vec<TimeSlot>> {
        debug!("GET {}", self.slots_url());
        let response = self
            .client
            .get(self.slots_url())
            .send()
            .await
            .map_err(transport)?;
        decode(check(response).await?).await
    }

    async fn get(&self, id: &str) -> SlotResult<TimeSlot> {
        let response = self
            .client
            .get(self.slot_url(id))
            .send()
            .await
            .map_err(transport)?;
        decode(check(response).await?).await
    }

    async fn create(&self, patch: TimeSlotPatch) -> SlotResult<TimeSlot> {
        let response = self
            .client
            .post(self.slots_url())
            .json(&patch)
            .send()
            .await
            .map_err(transport)?;
        decode(check(response).await?).await
    }

    async fn update(&self, id: &str, patch: TimeSlotPatch) -> SlotResult<TimeSlot> {
        debug!("PUT {}", self.slot_url(id));
        let response = self
            .client
            .put(self.slot_url(id))
            .json(&patch)
            .send()
            .await
            .map_err(transport)?;
        decode(check(response).await?).await
    }

    async fn delete(&self, id: &str) -> SlotResult<()> {
        let response = self
            .client
            .delete(self.slot_url(id))
            .send()
            .await
            .map_err(transport)?;
        let confirmation: DeleteSlotResponse = decode(check(response).await?).await?;
        debug!("{}: {}", id, confirmation.message);
        Ok(())
    }
}
