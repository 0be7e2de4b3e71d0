//! HTTP plumbing: request building, transport, response normalization

pub mod client;
pub mod normalizer;
pub mod request_builder;

pub use client::{HttpClient, HttpClientBuilder, HttpTransport, RawResponse};
pub use normalizer::normalize;
pub use request_builder::{PreparedRequest, RequestBody, RequestBuilder};
