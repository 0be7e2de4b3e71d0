//! Shared helpers for the session client integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use paylink_common::{MemoryStorage, TokenStore};
use paylink_domain::{ClientConfig, EndpointConfig, StorageBackend};
use paylink_infra::{HttpClient, RequestBuilder, SessionClient};
use wiremock::MockServer;

pub const TOKEN_KEY: &str = "authToken";

/// Client talking to `server`, with its credential in `storage`.
pub fn client_for(server: &MockServer, storage: MemoryStorage) -> SessionClient {
    client_with_endpoints(server, storage, EndpointConfig::default())
}

pub fn client_with_endpoints(
    server: &MockServer,
    storage: MemoryStorage,
    endpoints: EndpointConfig,
) -> SessionClient {
    SessionClient::new(
        Arc::new(HttpClient::new().expect("http client should build")),
        RequestBuilder::new(&server.uri()).expect("mock server uri should parse"),
        TokenStore::new(Arc::new(storage), TOKEN_KEY),
        endpoints,
    )
}

/// Client that already holds `token`, as if a previous run had logged in.
pub fn signed_in_client(server: &MockServer, token: &str) -> SessionClient {
    client_for(server, MemoryStorage::with_entry(TOKEN_KEY, token))
}

/// Configuration pointing at `server` with a session file under `dir`.
pub fn file_config(server: &MockServer, dir: &Path) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = server.uri();
    config.storage.backend = StorageBackend::File;
    config.storage.path = dir.join("session.json");
    config
}
