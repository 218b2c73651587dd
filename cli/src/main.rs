//! Command-line front end: orders a shipment from an order file, then
//! downloads its label into the working directory.

use std::process::ExitCode;

use courier_core::{
    ApiRequest, ClientConfig, CourierClient, FileSink, OrderDetails, ShipmentParams, Transport,
};

const DEFAULT_API_URL: &str = "https://mtapi.net/?testMode=1";

/// Executes requests with a blocking ureq agent.
///
/// ureq's status-as-error behavior is disabled: the carrier reports
/// failures inside HTTP 200 bodies, and non-200 replies still carry
/// bodies the client wants to see.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn exchange(&self, request: &ApiRequest) -> Option<String> {
        let mut response = self
            .agent
            .post(&request.url)
            .content_type(request.content_type.as_str())
            .send(request.body.as_bytes())
            .ok()?;
        response.body_mut().read_to_string().ok()
    }
}

fn main() -> ExitCode {
    let Some(order_path) = std::env::args().nth(1) else {
        eprintln!("usage: courier-cli <order.json>");
        return ExitCode::FAILURE;
    };

    let raw = match std::fs::read_to_string(&order_path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("cannot read {order_path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let order: OrderDetails = match serde_json::from_str(&raw) {
        Ok(order) => order,
        Err(e) => {
            eprintln!("invalid order in {order_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = ClientConfig {
        endpoint_url: std::env::var("COURIER_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        api_key: std::env::var("COURIER_API_KEY").unwrap_or_default(),
        label_format: std::env::var("COURIER_LABEL_FORMAT").unwrap_or_else(|_| "PDF".to_string()),
        service: std::env::var("COURIER_SERVICE").unwrap_or_default(),
    };
    let params = ShipmentParams {
        label_format: config.label_format.clone(),
        service: config.service.clone(),
    };

    let mut client = CourierClient::new(config, UreqTransport::new());
    let outcome = match client.create_shipment(&order, &params) {
        Ok(tracking) => {
            let mut sink = FileSink::new(".");
            client.fetch_label(&tracking, &mut sink)
        }
        Err(outcome) => outcome,
    };

    println!("{outcome}");
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
