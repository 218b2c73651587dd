//! The HTTP exchange seam between the adapter and the carrier.
//!
//! # Design
//! The core never touches the network. It builds [`ApiRequest`] values as
//! plain owned data and hands them to an injected [`Transport`], which
//! performs exactly one synchronous POST and returns the raw response body —
//! or nothing, when no body could be obtained. HTTP status codes are not
//! part of the contract: the carrier reports its errors inside the JSON
//! body, and the caller interprets those. Whatever connection the transport
//! opens is scoped to the single call and released regardless of outcome.

use serde::Serialize;

/// Content type declared on every carrier request.
pub const JSON_CONTENT_TYPE: &str = "text/json";

/// A single POST exchange with the carrier, described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub content_type: String,
    pub body: String,
}

impl ApiRequest {
    /// Serializes `payload` as the JSON body of a POST to `url`.
    pub fn post_json<P: Serialize>(url: &str, payload: &P) -> Result<Self, serde_json::Error> {
        Ok(Self {
            url: url.to_string(),
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: serde_json::to_string(payload)?,
        })
    }
}

/// Black-box request/response exchange capability.
///
/// Implementations execute the request and return the response body whenever
/// one was obtained, regardless of HTTP status. `None` means the transport
/// could not produce a body at all (connection failure, unreadable
/// response); the caller treats that as fatal.
pub trait Transport {
    fn exchange(&self, request: &ApiRequest) -> Option<String>;
}
