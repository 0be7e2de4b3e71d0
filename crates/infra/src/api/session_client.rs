//! Session client
//!
//! Orchestrates one operation at a time: build the request from the current
//! credential, send it once, normalize the response, and store any token a
//! login/signup hands back.

use std::sync::Arc;

use paylink_common::{CredentialStorage, FileStorage, KeychainStorage, MemoryStorage, TokenStore};
use paylink_domain::constants::{BALANCE_FALLBACK_STATUSES, DEFAULT_USER_AGENT, TOKEN_FIELDS};
use paylink_domain::{
    ApiError, ClientConfig, Credential, EndpointConfig, LoginRequest, OperationRequest,
    OperationResult, PayLinkError, Result, SendMoneyRequest, SessionState, SignupRequest,
    StorageBackend, StorageConfig,
};
use reqwest::header::HeaderValue;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::http::{normalize, HttpClient, HttpTransport, RequestBuilder};

/// Client-side gateway to the payments API
pub struct SessionClient {
    transport: Arc<dyn HttpTransport>,
    requests: RequestBuilder,
    tokens: TokenStore,
    endpoints: EndpointConfig,
}

impl SessionClient {
    /// Assemble a client from its parts and load any persisted credential.
    ///
    /// A storage read failure is logged and the client starts anonymous.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        requests: RequestBuilder,
        tokens: TokenStore,
        endpoints: EndpointConfig,
    ) -> Self {
        if let Err(e) = tokens.load() {
            warn!(error = %e, "Could not read persisted credential; starting anonymous");
        }
        Self { transport, requests, tokens, endpoints }
    }

    /// Build the reqwest transport and storage backend named by `config`.
    ///
    /// # Errors
    /// Returns `PayLinkError::Config` for an invalid configuration and
    /// `PayLinkError::Network` if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut http = HttpClient::builder().user_agent(
            config.api.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );
        if let Some(timeout) = config.api.timeout() {
            http = http.timeout(timeout);
        }

        let tokens = TokenStore::new(storage_for(&config.storage), config.storage.key.clone());
        let client = Self::new(
            Arc::new(http.build()?),
            RequestBuilder::new(&config.api.base_url)?,
            tokens,
            config.endpoints.clone(),
        );

        info!(
            base_url = %config.api.base_url,
            storage = %config.storage.backend,
            authenticated = client.is_authenticated(),
            "Session client ready"
        );
        Ok(client)
    }

    /// Create an account. A token in the response signs the user in.
    ///
    /// # Errors
    /// `Validation` for blank fields or a returned token that cannot be sent
    /// as a header, `Api`/`Transport` from the call, and `Storage` when a
    /// returned token could not be persisted. On `Storage` the session is
    /// already `Authenticated` for this process.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: &SignupRequest) -> OperationResult<Value> {
        request.validate()?;

        let op = OperationRequest::post(&self.endpoints.signup)
            .with_payload(request.to_payload())
            .encoded_as(self.endpoints.signup_encoding);

        let body = self.execute(&op).await?;
        self.store_token_from(&body)?;
        Ok(body)
    }

    /// Sign in and store the returned token.
    ///
    /// # Errors
    /// `Validation` for blank fields or a returned token that cannot be sent
    /// as a header, `Api`/`Transport` from the call, and `Storage` when the
    /// token could not be persisted. On `Storage` the session is already
    /// `Authenticated` for this process; only the restart copy is missing.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> OperationResult<Value> {
        request.validate()?;

        let op = OperationRequest::post(&self.endpoints.login)
            .with_payload(request.to_payload())
            .encoded_as(self.endpoints.login_encoding);

        let body = self.execute(&op).await?;
        self.store_token_from(&body)?;
        Ok(body)
    }

    /// Forget the credential locally. No request is sent.
    ///
    /// Always succeeds; a storage failure is logged.
    #[instrument(skip(self))]
    pub fn logout(&self) -> OperationResult<SessionState> {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Persisted credential could not be removed");
        }
        Ok(self.tokens.state())
    }

    /// # Errors
    /// `Validation` for a blank recipient or bad amount, `AuthRequired`
    /// without a credential, `Api`/`Transport` from the call.
    #[instrument(skip(self))]
    pub async fn send_money(&self, to: &str, amount: f64) -> OperationResult<Value> {
        let request = SendMoneyRequest::new(to, amount);
        request.validate()?;

        let op = OperationRequest::post(&self.endpoints.send)
            .authenticated()
            .with_payload(request.to_payload());
        self.execute(&op).await
    }

    /// Look up a balance, for `username` or the signed-in user.
    ///
    /// Servers that refuse the GET form with 405 or 400 are asked once more
    /// with `POST` and a JSON `username` body.
    ///
    /// # Errors
    /// `AuthRequired` without a credential, `Api`/`Transport` from the call.
    #[instrument(skip(self))]
    pub async fn check_balance(&self, username: Option<&str>) -> OperationResult<Value> {
        let username = username.map(str::trim).filter(|name| !name.is_empty());

        let mut lookup = OperationRequest::get(&self.endpoints.balance).authenticated();
        if let Some(name) = username {
            lookup = lookup.with_query("username", name);
        }

        match self.execute(&lookup).await {
            Err(err) if err.status_code.is_some_and(|s| BALANCE_FALLBACK_STATUSES.contains(&s)) => {
                info!(status = ?err.status_code, "Balance GET refused, retrying as POST");

                let mut fallback = OperationRequest::post(&self.endpoints.balance).authenticated();
                if let Some(name) = username {
                    fallback = fallback.with_field("username", name);
                }
                self.execute(&fallback).await
            }
            other => other,
        }
    }

    /// # Errors
    /// `AuthRequired` without a credential, `Api`/`Transport` from the call.
    #[instrument(skip(self))]
    pub async fn list_transactions(&self) -> OperationResult<Value> {
        let op = OperationRequest::get(&self.endpoints.transactions).authenticated();
        self.execute(&op).await
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.tokens.state()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// Observe `Anonymous`/`Authenticated` transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tokens.subscribe()
    }

    #[must_use]
    pub fn current_credential(&self) -> Option<Credential> {
        self.tokens.current()
    }

    #[must_use]
    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    async fn execute(&self, op: &OperationRequest) -> OperationResult<Value> {
        let credential = self.tokens.current();
        let request = self.requests.build(op, credential.as_ref())?;

        debug!(
            method = %op.method,
            endpoint = %op.endpoint,
            authenticated = op.requires_auth,
            has_body = op.has_body(),
            "Dispatching request"
        );

        let response = self.transport.execute(request).await.inspect_err(|e| {
            warn!(endpoint = %op.endpoint, error = %e, "Request did not complete");
        })?;

        let result = normalize(response.status, &response.body);
        match &result {
            Ok(_) => debug!(endpoint = %op.endpoint, status = response.status, "Request succeeded"),
            Err(e) => warn!(
                endpoint = %op.endpoint,
                status = response.status,
                kind = e.label(),
                message = %e.message,
                "Request rejected"
            ),
        }
        result
    }

    fn store_token_from(&self, body: &Value) -> OperationResult<()> {
        let Some(credential) = extract_token(body) else {
            debug!("Response carried no token");
            return Ok(());
        };

        if HeaderValue::from_str(&credential.bearer()).is_err() {
            warn!("Response token is not a valid header value; not storing it");
            return Err(ApiError::validation(
                "server returned a token that cannot be sent as a header",
            ));
        }

        self.tokens.save(credential).map_err(|e| ApiError::from(PayLinkError::from(e)))
    }
}

/// First non-blank string among the known token fields.
fn extract_token(body: &Value) -> Option<Credential> {
    TOKEN_FIELDS
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str).and_then(Credential::from_token))
}

fn storage_for(config: &StorageConfig) -> Arc<dyn CredentialStorage> {
    match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(FileStorage::new(&config.path)),
        StorageBackend::Keychain => Arc::new(KeychainStorage::new(&config.keychain_service)),
    }
}
