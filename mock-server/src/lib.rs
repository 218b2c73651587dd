use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Bytes served as the label for every stored shipment, base64-encoded
/// into `LabelImage`.
pub const LABEL_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n";

/// Request envelope shared by every carrier command.
#[derive(Debug, Deserialize)]
pub struct CommandEnvelope {
    #[serde(rename = "Apikey", default)]
    pub apikey: String,
    #[serde(rename = "Command", default)]
    pub command: String,
    #[serde(rename = "Shipment", default)]
    pub shipment: serde_json::Value,
}

/// `Shipment` block of a `GetShipmentLabel` request.
#[derive(Debug, Default, Deserialize)]
pub struct LabelRequest {
    #[serde(rename = "TrackingNumber", default)]
    pub tracking_number: String,
    #[serde(rename = "LabelFormat", default)]
    pub label_format: String,
}

/// Carrier reply. The real API answers HTTP 200 to every command and
/// signals failure in-band through `ErrorLevel`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "ErrorLevel")]
    pub error_level: i64,
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(rename = "Shipment", skip_serializing_if = "Option::is_none")]
    pub shipment: Option<ReplyShipment>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplyShipment {
    #[serde(rename = "TrackingNumber", skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(rename = "LabelImage", skip_serializing_if = "Option::is_none")]
    pub label_image: Option<String>,
}

impl Reply {
    pub fn ok(shipment: ReplyShipment) -> Self {
        Self {
            error_level: 0,
            error: String::new(),
            shipment: Some(shipment),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error_level: 1,
            error: message.into(),
            shipment: None,
        }
    }
}

/// Ordered shipments, keyed by tracking number, stored as received.
pub type Db = Arc<RwLock<HashMap<String, serde_json::Value>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new().route("/", post(dispatch)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// Clients send `Content-Type: text/json`, which the `Json` extractor
// rejects with 415, so the body is taken as a string and parsed by hand.
async fn dispatch(State(db): State<Db>, body: String) -> Json<Reply> {
    let Ok(envelope) = serde_json::from_str::<CommandEnvelope>(&body) else {
        return Json(Reply::error("Invalid request body"));
    };
    if envelope.apikey.is_empty() {
        return Json(Reply::error("Invalid API key"));
    }
    match envelope.command.as_str() {
        "OrderShipment" => Json(order_shipment(db, envelope.shipment).await),
        "GetShipmentLabel" => Json(get_shipment_label(db, envelope.shipment).await),
        other => Json(Reply::error(format!("Unknown command: {other}"))),
    }
}

async fn order_shipment(db: Db, shipment: serde_json::Value) -> Reply {
    let tracking = format!("TRK{}", Uuid::new_v4().simple());
    db.write().await.insert(tracking.clone(), shipment);
    Reply::ok(ReplyShipment {
        tracking_number: Some(tracking),
        label_image: None,
    })
}

async fn get_shipment_label(db: Db, shipment: serde_json::Value) -> Reply {
    let request: LabelRequest = serde_json::from_value(shipment).unwrap_or_default();
    if !db.read().await.contains_key(&request.tracking_number) {
        return Reply::error(format!(
            "No shipment found for {}",
            request.tracking_number
        ));
    }
    Reply::ok(ReplyShipment {
        tracking_number: Some(request.tracking_number),
        label_image: Some(STANDARD.encode(LABEL_PDF)),
    })
}
