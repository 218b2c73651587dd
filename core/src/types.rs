//! Domain DTOs describing an order and its shipment parameters.
//!
//! # Design
//! `OrderDetails` is a deliberately flat, validation-free mapping of sender
//! and recipient fields. Every field defaults to the empty string, so an
//! order document missing a field still produces a complete wire payload —
//! the carrier schema is fixed-shape and the core passes whatever it was
//! given straight through.

use serde::Deserialize;

/// Sender and recipient details for one shipment.
///
/// The core performs no validation: an empty or missing field is sent to the
/// carrier as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    pub sender_fullname: String,
    pub sender_company: String,
    pub sender_address: String,
    pub sender_city: String,
    pub sender_postalcode: String,
    pub sender_phone: String,
    pub sender_email: String,
    pub delivery_fullname: String,
    pub delivery_company: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_postalcode: String,
    pub delivery_country: String,
    pub delivery_phone: String,
    pub delivery_email: String,
}

/// Per-shipment parameters: the label rendering format (e.g. `"PDF"`) and
/// the carrier service level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShipmentParams {
    pub label_format: String,
    pub service: String,
}
