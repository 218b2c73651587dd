//! Wire-schema payloads for the two carrier commands.
//!
//! # Design
//! The carrier expects fixed-shape JSON: every field of the schema is
//! present on every request, and fields with no source value are sent as
//! empty strings, never omitted. The two builders are pure functions that
//! map order and parameter fields into that shape and nothing else. Fields
//! the order model does not carry yet (weight, dimensions, customs values,
//! the product line) are extension points; until wired up they stay empty so
//! the shape on the wire never changes.

use serde::Serialize;

use crate::types::{OrderDetails, ShipmentParams};

/// Carrier command selector; serializes to the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    OrderShipment,
    GetShipmentLabel,
}

/// Request envelope for [`Command::OrderShipment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderShipmentPayload {
    #[serde(rename = "Apikey")]
    pub api_key: String,
    pub command: Command,
    pub shipment: ShipmentOrder,
}

/// Request envelope for [`Command::GetShipmentLabel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentLabelPayload {
    #[serde(rename = "Apikey")]
    pub api_key: String,
    pub command: Command,
    pub shipment: LabelRequest,
}

/// The `Shipment` object of a creation request.
///
/// Field order and presence match the carrier schema exactly; every `String`
/// here lands on the wire even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentOrder {
    pub label_format: String,
    pub shipper_reference: String,
    pub order_reference: String,
    pub order_date: String,
    pub display_id: String,
    pub invoice_number: String,
    pub service: String,
    pub weight: String,
    pub weight_unit: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub dim_unit: String,
    pub value: String,
    pub shipping_value: String,
    pub currency: String,
    pub customs_duty: String,
    pub description: String,
    pub declaration_type: String,
    pub dangerous_goods: String,
    pub export_carrier_name: String,
    pub export_awb: String,
    pub consignor_address: ConsignorAddress,
    pub consignee_address: ConsigneeAddress,
    pub products: Vec<Product>,
}

/// Sender address block. The carrier's consignor shape carries EU customs
/// identifiers the consignee shape does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsignorAddress {
    pub name: String,
    pub company: String,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub vat: String,
    pub eori: String,
    pub nl_vat: String,
    pub eu_eori: String,
    pub ioss: String,
}

/// Recipient address block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsigneeAddress {
    pub name: String,
    pub company: String,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub vat: String,
    pub pudo_location_id: String,
}

/// One product line item. The default value is the all-empty placeholder
/// line the creation payload always carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub description: String,
    pub sku: String,
    pub hs_code: String,
    pub origin_country: String,
    pub img_url: String,
    pub purchase_url: String,
    pub quantity: String,
    pub value: String,
    pub weight: String,
    pub days_for_return: String,
    pub non_returnable: String,
}

/// The `Shipment` object of a label-retrieval request. `ShipperReference`
/// is always sent empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelRequest {
    pub label_format: String,
    pub tracking_number: String,
    pub shipper_reference: String,
}

/// Builds the creation payload for one order.
///
/// Consignor and consignee blocks mirror the corresponding `order` fields;
/// label format and service come from `params`. The consignor country is not
/// part of the order model and is sent empty, like every other unmapped
/// field.
pub fn order_shipment(
    api_key: &str,
    order: &OrderDetails,
    params: &ShipmentParams,
) -> OrderShipmentPayload {
    OrderShipmentPayload {
        api_key: api_key.to_string(),
        command: Command::OrderShipment,
        shipment: ShipmentOrder {
            label_format: params.label_format.clone(),
            shipper_reference: String::new(),
            order_reference: String::new(),
            order_date: String::new(),
            display_id: String::new(),
            invoice_number: String::new(),
            service: params.service.clone(),
            weight: String::new(),
            weight_unit: String::new(),
            length: String::new(),
            width: String::new(),
            height: String::new(),
            dim_unit: String::new(),
            value: String::new(),
            shipping_value: String::new(),
            currency: String::new(),
            customs_duty: String::new(),
            description: String::new(),
            declaration_type: String::new(),
            dangerous_goods: String::new(),
            export_carrier_name: String::new(),
            export_awb: String::new(),
            consignor_address: ConsignorAddress {
                name: order.sender_fullname.clone(),
                company: order.sender_company.clone(),
                address_line1: order.sender_address.clone(),
                city: order.sender_city.clone(),
                zip: order.sender_postalcode.clone(),
                phone: order.sender_phone.clone(),
                email: order.sender_email.clone(),
                ..ConsignorAddress::default()
            },
            consignee_address: ConsigneeAddress {
                name: order.delivery_fullname.clone(),
                company: order.delivery_company.clone(),
                address_line1: order.delivery_address.clone(),
                city: order.delivery_city.clone(),
                zip: order.delivery_postalcode.clone(),
                country: order.delivery_country.clone(),
                phone: order.delivery_phone.clone(),
                email: order.delivery_email.clone(),
                ..ConsigneeAddress::default()
            },
            products: vec![Product::default()],
        },
    }
}

/// Builds the label-retrieval payload for a previously created shipment.
pub fn shipment_label(
    api_key: &str,
    label_format: &str,
    tracking_number: &str,
) -> ShipmentLabelPayload {
    ShipmentLabelPayload {
        api_key: api_key.to_string(),
        command: Command::GetShipmentLabel,
        shipment: LabelRequest {
            label_format: label_format.to_string(),
            tracking_number: tracking_number.to_string(),
            shipper_reference: String::new(),
        },
    }
}
