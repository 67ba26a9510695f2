mod response;
use response::{ControlResponse, DeviceDataResponse, LoginResponse};

mod token;
pub use token::{is_valid_token, is_valid_token_at};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map};
use tokio::sync::Mutex;

use crate::{DeviceProperty, Error, Result};

const TIMEOUT: Duration = Duration::from_secs(5);
const TOKEN_HEADER: &str = "x-token";
const LOGIN_PATH: &str = "/v1.0/openapi/auth/login";
const CONTROL_PATH: &str = "/api/v1/device/control";

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDataParams {
    pub is_all: bool,
    pub last: bool,
}

impl Default for DeviceDataParams {
    fn default() -> Self {
        Self {
            is_all: true,
            last: true,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceHistoryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Client of the Hummingbird IoT platform HTTP API.
///
/// Logs in lazily and reuses the token until it expires or the platform
/// rejects it.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    credentials: Credentials,
    http: reqwest::Client,
    token: Arc<Mutex<Option<String>>>,
}

impl Client {
    pub fn new<U: Into<String>>(base_url: U, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Ok(Self {
            base_url,
            credentials,
            http,
            token: Arc::new(Mutex::new(None)),
        })
    }

    pub async fn login(&self) -> Result<String> {
        let mut stored = self.token.lock().await;
        self.login_locked(&mut stored).await
    }

    /// Logs in with the token lock held, so concurrent callers wait for this
    /// login instead of starting their own.
    async fn login_locked(&self, stored: &mut Option<String>) -> Result<String> {
        debug!("logging in as {}", self.credentials.username);
        *stored = None;

        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(&self.credentials)
            .send()
            .await?;

        let response: LoginResponse = read_response(response).await?;

        let token = response
            .result
            .and_then(|result| result.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                error!("login failed: {}", response.message);
                Error::MissingToken
            })?;

        *stored = Some(token.clone());
        info!("logged in to {}", self.base_url);

        Ok(token)
    }

    pub async fn last_data(
        &self,
        device_id: &str,
        params: DeviceDataParams,
    ) -> Result<Vec<DeviceProperty>> {
        let token = self.token().await?;
        let url = self.url(&format!("/api/v1/device/{device_id}/thing-model/property"));

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, token)
            .query(&params)
            .send()
            .await?;

        let response: DeviceDataResponse = self.parse(response).await?;
        trace!(
            "device {device_id} responded {} {}: {} properties",
            response.code,
            response.message,
            response.result.list.len()
        );

        Ok(response.result.list)
    }

    pub async fn last_data_many(&self, device_ids: &[&str]) -> Result<Vec<Vec<DeviceProperty>>> {
        let requests = device_ids
            .iter()
            .map(|device_id| self.last_data(device_id, DeviceDataParams::default()));

        futures::future::try_join_all(requests).await
    }

    pub async fn update_device(
        &self,
        device_id: &str,
        data: Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let token = self.token().await?;
        let body = json!({ "deviceId": device_id, "data": data });

        let response = self
            .http
            .post(self.url(CONTROL_PATH))
            .header(TOKEN_HEADER, token)
            .json(&body)
            .send()
            .await?;

        let response: ControlResponse = self.parse(response).await?;
        debug!(
            "device {device_id} control responded {} {}",
            response.code, response.message
        );

        Ok(response.result)
    }

    pub async fn send_control_command(
        &self,
        device_id: &str,
        control_code: i64,
    ) -> Result<serde_json::Value> {
        let mut data = Map::new();
        data.insert("controlCode".to_owned(), control_code.into());

        self.update_device(device_id, data).await
    }

    pub async fn history(
        &self,
        device_id: &str,
        params: &DeviceHistoryParams,
    ) -> Result<serde_json::Value> {
        let token = self.token().await?;
        let url = self.url(&format!("/api/v1/device/{device_id}/thing-model/history"));

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, token)
            .query(params)
            .send()
            .await?;

        self.parse(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn token(&self) -> Result<String> {
        let mut stored = self.token.lock().await;

        if let Some(token) = stored.as_deref() {
            if is_valid_token(token) {
                return Ok(token.to_owned());
            }
            debug!("stored token has expired");
        }

        self.login_locked(&mut stored).await
    }

    async fn parse<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let result = read_response(response).await;

        if let Err(Error::Unauthorized) = result {
            error!("token is invalid or expired, cleared the stored token");
            *self.token.lock().await = None;
        }

        result
    }
}

async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    match status.as_u16() {
        401 => return Err(Error::Unauthorized),
        403 => error!("no permission to access {}", response.url()),
        404 => error!("{} does not exist", response.url()),
        500 => error!("platform internal error at {}", response.url()),
        code => error!("request to {} failed with {code}", response.url()),
    }

    Err(Error::Status(status.as_u16()))
}
