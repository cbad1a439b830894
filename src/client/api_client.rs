// HTTP client for the contas backend
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::conta::{Conta, ContaId, ContaPayload, Credenciais, MensagemResponse};
use crate::error::ClientError;

/// Every request goes through one `reqwest::Client` with a cookie store, so
/// the session cookie set by `/login` rides along on all later calls.
pub struct ApiClient {
    base_url: String,
    client: Client,
    request_id: AtomicU64,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::build(base_url, None)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::build(&config.base_url, config.timeout())
    }

    fn build(base_url: &str, timeout: Option<std::time::Duration>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .cookie_store(true)
            .default_headers(headers);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            request_id: AtomicU64::new(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    // Helper for sending requests
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<T, ClientError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        debug!(request_id = id, "-> {} {}", method, path);

        let response = req
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        debug!(request_id = id, status = status.as_u16(), "<- {} {}", method, path);

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(format!("Failed to parse response: {}", e)));
        }

        // Error bodies are `{erro}`; tolerate anything else
        let body: MensagemResponse = response.json().await.unwrap_or_default();
        let message = body
            .erro
            .or(body.mensagem)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        warn!(request_id = id, status = status.as_u16(), "{} {} failed: {}", method, path, message);

        if status == StatusCode::UNAUTHORIZED {
            Err(ClientError::Unauthorized { message })
        } else {
            Err(ClientError::Api { status: status.as_u16(), message })
        }
    }

    pub async fn login(&self, credenciais: &Credenciais) -> Result<MensagemResponse, ClientError> {
        let req = self.request(Method::POST, "/login").json(credenciais);
        self.send(Method::POST, "/login", req).await
    }

    pub async fn registrar(&self, credenciais: &Credenciais) -> Result<MensagemResponse, ClientError> {
        let req = self.request(Method::POST, "/registrar").json(credenciais);
        self.send(Method::POST, "/registrar", req).await
    }

    pub async fn logout(&self) -> Result<MensagemResponse, ClientError> {
        let req = self.request(Method::POST, "/logout");
        self.send(Method::POST, "/logout", req).await
    }

    pub async fn listar_contas(&self) -> Result<Vec<Conta>, ClientError> {
        let req = self.request(Method::GET, "/contas");
        self.send(Method::GET, "/contas", req).await
    }

    pub async fn obter_conta(&self, id: ContaId) -> Result<Conta, ClientError> {
        let path = format!("/contas/{}", id);
        let req = self.request(Method::GET, &path);
        self.send(Method::GET, &path, req).await
    }

    pub async fn criar_conta(&self, payload: &ContaPayload) -> Result<MensagemResponse, ClientError> {
        let req = self.request(Method::POST, "/contas").json(payload);
        self.send(Method::POST, "/contas", req).await
    }

    pub async fn atualizar_conta(
        &self,
        id: ContaId,
        payload: &ContaPayload,
    ) -> Result<MensagemResponse, ClientError> {
        let path = format!("/contas/{}", id);
        let req = self.request(Method::PUT, &path).json(payload);
        self.send(Method::PUT, &path, req).await
    }

    pub async fn excluir_conta(&self, id: ContaId) -> Result<MensagemResponse, ClientError> {
        let path = format!("/contas/{}", id);
        let req = self.request(Method::DELETE, &path);
        self.send(Method::DELETE, &path, req).await
    }
}
