//! Interpretation of carrier replies.
//!
//! # Design
//! A reply is kept in two forms: the raw body as received (terminal failure
//! messages quote it verbatim) and the decoded view of the fields the
//! adapter reads. `ErrorLevel` is observed independently of the payload
//! data — a non-zero level can accompany a perfectly usable tracking number,
//! so decoding never fails the call by itself; the caller branches on the
//! success field it actually needs.

use serde::Deserialize;

/// Decoded carrier reply paired with the raw body it was decoded from.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    raw: String,
    error_level: i64,
    error: String,
    tracking_number: Option<String>,
    label_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyDocument {
    #[serde(rename = "ErrorLevel", default)]
    error_level: i64,
    #[serde(rename = "Error", default)]
    error: String,
    #[serde(rename = "Shipment", default)]
    shipment: Option<ReplyShipment>,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyShipment {
    #[serde(rename = "TrackingNumber")]
    tracking_number: Option<String>,
    #[serde(rename = "LabelImage")]
    label_image: Option<String>,
}

impl ApiResponse {
    /// Decodes a response body. Only a JSON mapping decodes; anything else
    /// is not a carrier reply.
    pub fn decode(raw: String) -> Result<Self, serde_json::Error> {
        let document: ReplyDocument = serde_json::from_str(&raw)?;
        let shipment = document.shipment.unwrap_or_default();
        Ok(Self {
            raw,
            error_level: document.error_level,
            error: document.error,
            tracking_number: shipment.tracking_number,
            label_image: shipment.label_image,
        })
    }

    /// Carrier error level; zero (also when absent) means no error.
    pub fn error_level(&self) -> i64 {
        self.error_level
    }

    /// Carrier error message; empty when the reply carries none.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// The log entry for a carrier-reported error, `None` when
    /// [`error_level`](Self::error_level) is zero.
    pub fn error_log_entry(&self) -> Option<String> {
        (self.error_level != 0)
            .then(|| format!("ErrorLevel: {} [ {} ]", self.error_level, self.error))
    }

    /// `Shipment.TrackingNumber`, the success field of a creation call.
    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    /// `Shipment.LabelImage`, the success field of a label-retrieval call.
    pub fn label_image(&self) -> Option<&str> {
        self.label_image.as_deref()
    }

    /// The serialized response exactly as received.
    pub fn raw_body(&self) -> &str {
        &self.raw
    }
}
