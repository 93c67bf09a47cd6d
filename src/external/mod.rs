use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::error;

use crate::config::FlowUrls;

pub mod mapper;
pub use mapper::map_list_item;

/// Every webhook call gets a single attempt bounded by this timeout.
const FLOW_TIMEOUT: Duration = Duration::from_secs(30);

/// Adapter over the five Power Automate flows that front the SharePoint list.
pub struct FlowClient {
    client: Client,
    urls: FlowUrls,
}

impl FlowClient {
    pub fn new(urls: FlowUrls) -> Self {
        let client = Client::builder()
            .timeout(FLOW_TIMEOUT)
            .build()
            .expect("Could not build the flow HTTP client");
        FlowClient { client, urls }
    }

    /// POSTs JSON to one of the configured flows, `{}` when there is no
    /// payload. Failures (network, timeout, non-2xx) log the remote detail and
    /// bubble up; whether that becomes a 500 or a 404 is the route's call.
    async fn call_flow(&self, url: &str, payload: Option<Value>) -> Result<Value, reqwest::Error> {
        let body = payload.unwrap_or_else(|| json!({}));
        let response = match self.client.post(url).json(&body).send().await {
            Ok(response) => response,
            Err(err) => {
                error!("Error en Power Automate: {err}");
                return Err(err);
            }
        };
        let status_err = response.error_for_status_ref().err();
        if let Some(err) = status_err {
            let detail = response.text().await.unwrap_or_default();
            error!("Error en Power Automate: {detail}");
            return Err(err);
        }
        response.json().await.map_err(|err| {
            error!("Error en Power Automate: {err}");
            err
        })
    }

    /// The flow answers with the created list item.
    pub async fn create(&self, payload: Value) -> Result<Value, reqwest::Error> {
        self.call_flow(&self.urls.create, Some(payload)).await
    }

    /// The flow answers with the whole list as a JSON array.
    pub async fn read_all(&self) -> Result<Value, reqwest::Error> {
        self.call_flow(&self.urls.read_all, None).await
    }

    pub async fn read_one(&self, id: i64) -> Result<Value, reqwest::Error> {
        self.call_flow(&self.urls.read_one, Some(json!({ "id": id })))
            .await
    }

    /// The flow answers with the updated list item.
    pub async fn update(&self, payload: Value) -> Result<Value, reqwest::Error> {
        self.call_flow(&self.urls.update, Some(payload)).await
    }

    pub async fn delete(&self, id: i64) -> Result<Value, reqwest::Error> {
        self.call_flow(&self.urls.delete, Some(json!({ "id": id })))
            .await
    }
}
