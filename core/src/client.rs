//! The courier client: configuration, the two workflow operations, and the
//! error log they share.
//!
//! # Design
//! `CourierClient` performs no I/O of its own — every call goes through the
//! injected [`Transport`]. Failures travel on two independent tiers:
//! a transport that cannot produce a body ends the workflow at once with a
//! fixed 502 outcome, while a carrier-reported error (`ErrorLevel` non-zero)
//! is only appended to the instance's error log and the decoded response is
//! still handed to the operation, whose own success field decides the
//! outcome. Terminal 200/400 messages append the log, deduplicated at
//! report time.

use serde::Serialize;

use crate::outcome::Outcome;
use crate::payload;
use crate::response::ApiResponse;
use crate::sink::{self, LabelSink};
use crate::transport::{ApiRequest, Transport};
use crate::types::{OrderDetails, ShipmentParams};

/// Message of the transport-fatal outcome.
const UNEXPECTED_RESPONSE: &str = "Unexpected response from courier API";

/// Immutable client configuration, constructed once per client lifetime.
///
/// `endpoint_url` is the complete POST target, used verbatim (it may carry
/// query parameters). `label_format` and `service` are the instance-wide
/// defaults an orchestrator hands to the operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint_url: String,
    pub api_key: String,
    pub label_format: String,
    pub service: String,
}

/// Client for the courier API, owning the configuration, the transport and
/// the error log accumulated across this instance's calls.
pub struct CourierClient<T> {
    config: ClientConfig,
    transport: T,
    error_log: Vec<String>,
}

impl<T: Transport> CourierClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            error_log: Vec::new(),
        }
    }

    /// Error strings recorded so far, in insertion order, duplicates kept.
    pub fn error_log(&self) -> &[String] {
        &self.error_log
    }

    /// Submits a shipment-creation request and returns the carrier-issued
    /// tracking number.
    ///
    /// A reply without `Shipment.TrackingNumber` ends the workflow with a
    /// 400 outcome quoting the serialized response. The error log may grow
    /// even on the success path when the carrier reports a non-fatal error
    /// alongside the tracking number.
    pub fn create_shipment(
        &mut self,
        order: &OrderDetails,
        params: &ShipmentParams,
    ) -> Result<String, Outcome> {
        let payload = payload::order_shipment(&self.config.api_key, order, params);
        let response = self.call_api(&payload)?;
        match response.tracking_number() {
            Some(tracking_number) => Ok(tracking_number.to_string()),
            None => Err(self.end_with(400, response.raw_body().to_string())),
        }
    }

    /// Retrieves the label for a tracking number and persists it through
    /// `sink`. Always terminal: success is the 200 outcome naming the
    /// written file, any failure the corresponding 400/502 outcome.
    ///
    /// The tracking number is trusted as returned by
    /// [`create_shipment`](Self::create_shipment); no validation is applied.
    pub fn fetch_label(&mut self, tracking_number: &str, sink: &mut dyn LabelSink) -> Outcome {
        let payload = payload::shipment_label(
            &self.config.api_key,
            &self.config.label_format,
            tracking_number,
        );
        let response = match self.call_api(&payload) {
            Ok(response) => response,
            Err(outcome) => return outcome,
        };
        let Some(image) = response.label_image() else {
            return self.end_with(400, response.raw_body().to_string());
        };
        match sink::persist_label(sink, image, tracking_number) {
            Ok(filename) => {
                self.end_with(200, format!("Label {filename} was downloaded to your device"))
            }
            Err(err) => self.end_with(400, format!("Label for {tracking_number}: {err}")),
        }
    }

    /// One carrier exchange: serialize, POST, decode, record any reported
    /// error. Carrier errors are non-fatal here — the response is returned
    /// regardless — while anything short of a decodable body is.
    fn call_api<P: Serialize>(&mut self, payload: &P) -> Result<ApiResponse, Outcome> {
        let Ok(request) = ApiRequest::post_json(&self.config.endpoint_url, payload) else {
            return Err(transport_failure());
        };
        let Some(raw) = self.transport.exchange(&request) else {
            return Err(transport_failure());
        };
        let Ok(response) = ApiResponse::decode(raw) else {
            return Err(transport_failure());
        };
        if let Some(entry) = response.error_log_entry() {
            self.error_log.push(entry);
        }
        Ok(response)
    }

    /// Terminal outcome for the 200/400 paths: appends the deduplicated
    /// error log to the message when any entries exist.
    fn end_with(&self, status: u16, message: String) -> Outcome {
        if self.error_log.is_empty() {
            return Outcome::new(status, message);
        }
        let errors = serde_json::Value::from(dedup(&self.error_log));
        Outcome::new(status, format!("{message}, Errors: {errors}"))
    }
}

/// The transport-fatal outcome: fixed message, independent of the error log.
fn transport_failure() -> Outcome {
    Outcome::new(502, UNEXPECTED_RESPONSE)
}

/// First-occurrence, order-preserving dedup. Insertion keeps duplicates;
/// this runs only at report time.
fn dedup(entries: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for entry in entries {
        if !unique.contains(entry) {
            unique.push(entry.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    use crate::sink::ResponseSink;

    /// Transport double replaying a scripted sequence of exchange results
    /// and capturing every request it saw.
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Option<String>>>,
        requests: Rc<RefCell<Vec<ApiRequest>>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Option<String>>) -> (Self, Rc<RefCell<Vec<ApiRequest>>>) {
            let requests = Rc::new(RefCell::new(Vec::new()));
            let transport = Self {
                replies: RefCell::new(replies.into()),
                requests: Rc::clone(&requests),
            };
            (transport, requests)
        }
    }

    impl Transport for ScriptedTransport {
        fn exchange(&self, request: &ApiRequest) -> Option<String> {
            self.requests.borrow_mut().push(request.clone());
            self.replies.borrow_mut().pop_front().flatten()
        }
    }

    fn body(raw: &str) -> Option<String> {
        Some(raw.to_string())
    }

    fn config() -> ClientConfig {
        ClientConfig {
            endpoint_url: "https://courier.test/?testMode=1".to_string(),
            api_key: "test-key".to_string(),
            label_format: "PDF".to_string(),
            service: "PPTT".to_string(),
        }
    }

    fn client(
        replies: Vec<Option<String>>,
    ) -> (
        CourierClient<ScriptedTransport>,
        Rc<RefCell<Vec<ApiRequest>>>,
    ) {
        let (transport, requests) = ScriptedTransport::new(replies);
        (CourierClient::new(config(), transport), requests)
    }

    fn warsaw_to_berlin() -> OrderDetails {
        OrderDetails {
            sender_fullname: "Jan Kowalski".to_string(),
            sender_city: "Warsaw".to_string(),
            sender_postalcode: "00-001".to_string(),
            delivery_fullname: "Erika Mustermann".to_string(),
            delivery_city: "Berlin".to_string(),
            delivery_country: "DE".to_string(),
            ..OrderDetails::default()
        }
    }

    fn params() -> ShipmentParams {
        ShipmentParams {
            label_format: "PDF".to_string(),
            service: "PPTT".to_string(),
        }
    }

    #[test]
    fn create_shipment_returns_tracking_number() {
        let (mut client, _) = client(vec![body(r#"{"Shipment":{"TrackingNumber":"TRK-1"}}"#)]);
        let tracking = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap();
        assert_eq!(tracking, "TRK-1");
        assert!(client.error_log().is_empty());
    }

    #[test]
    fn create_shipment_without_tracking_number_is_400_with_raw_response() {
        let raw = r#"{"ErrorLevel":1,"Error":"Invalid API key"}"#;
        let (mut client, _) = client(vec![body(raw)]);

        let outcome = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap_err();

        assert_eq!(outcome.status, 400);
        assert_eq!(
            outcome.message,
            format!(r#"{raw}, Errors: ["ErrorLevel: 1 [ Invalid API key ]"]"#)
        );
    }

    #[test]
    fn carrier_error_alongside_tracking_number_is_logged_not_fatal() {
        let (mut client, _) = client(vec![body(
            r#"{"ErrorLevel":5,"Error":"bad zip","Shipment":{"TrackingNumber":"TRK-1"}}"#,
        )]);

        let tracking = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap();

        assert_eq!(tracking, "TRK-1");
        assert_eq!(client.error_log(), ["ErrorLevel: 5 [ bad zip ]"]);
    }

    #[test]
    fn repeated_errors_are_logged_twice_but_reported_once() {
        let with_tracking =
            r#"{"ErrorLevel":5,"Error":"bad zip","Shipment":{"TrackingNumber":"TRK-1"}}"#;
        let without_label = r#"{"ErrorLevel":5,"Error":"bad zip"}"#;
        let (mut client, _) = client(vec![body(with_tracking), body(without_label)]);

        let tracking = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap();
        let mut sink = ResponseSink::new();
        let outcome = client.fetch_label(&tracking, &mut sink);

        assert_eq!(
            client.error_log(),
            ["ErrorLevel: 5 [ bad zip ]", "ErrorLevel: 5 [ bad zip ]"]
        );
        assert_eq!(outcome.status, 400);
        assert_eq!(
            outcome.message.matches("ErrorLevel: 5 [ bad zip ]").count(),
            1,
            "report should deduplicate the pair: {}",
            outcome.message
        );
    }

    #[test]
    fn transport_without_body_is_fixed_502() {
        let (mut client, _) = client(vec![None]);
        let outcome = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap_err();
        assert_eq!(outcome, Outcome::new(502, "Unexpected response from courier API"));
    }

    #[test]
    fn transport_failure_ignores_accumulated_error_log() {
        let with_tracking =
            r#"{"ErrorLevel":5,"Error":"bad zip","Shipment":{"TrackingNumber":"TRK-1"}}"#;
        let (mut client, _) = client(vec![body(with_tracking), None]);

        let tracking = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap();
        let mut sink = ResponseSink::new();
        let outcome = client.fetch_label(&tracking, &mut sink);

        assert!(!client.error_log().is_empty());
        assert_eq!(outcome.status, 502);
        assert_eq!(outcome.message, "Unexpected response from courier API");
    }

    #[test]
    fn undecodable_body_is_transport_failure() {
        let (mut client, _) = client(vec![body("<html>bad gateway</html>")]);
        let outcome = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap_err();
        assert_eq!(outcome.status, 502);
    }

    #[test]
    fn fetch_label_persists_and_names_the_file() {
        let image = STANDARD.encode(b"%PDF-1.4 label");
        let reply = format!(r#"{{"Shipment":{{"LabelImage":"{image}"}}}}"#);
        let (mut client, _) = client(vec![Some(reply)]);

        let mut sink = ResponseSink::new();
        let outcome = client.fetch_label("ABC123", &mut sink);

        assert_eq!(
            outcome,
            Outcome::new(200, "Label ABC123.pdf was downloaded to your device")
        );
        assert_eq!(sink.body(), b"%PDF-1.4 label");
        assert!(sink
            .headers()
            .iter()
            .any(|(name, value)| name == "Content-Disposition"
                && value == "inline; filename=\"ABC123.pdf\""));
    }

    #[test]
    fn fetch_label_without_image_is_400_with_raw_response() {
        let raw = r#"{"Shipment":{"TrackingNumber":"TRK-1"}}"#;
        let (mut client, _) = client(vec![body(raw)]);

        let mut sink = ResponseSink::new();
        let outcome = client.fetch_label("TRK-1", &mut sink);

        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.message, raw);
    }

    #[test]
    fn fetch_label_with_invalid_base64_is_400() {
        let (mut client, _) = client(vec![body(r#"{"Shipment":{"LabelImage":"!!not-base64!!"}}"#)]);

        let mut sink = ResponseSink::new();
        let outcome = client.fetch_label("TRK-1", &mut sink);

        assert_eq!(outcome.status, 400);
        assert!(outcome.message.contains("invalid base64 label image"));
    }

    #[test]
    fn success_message_still_reports_errors_from_earlier_calls() {
        let warned =
            r#"{"ErrorLevel":5,"Error":"address normalized","Shipment":{"TrackingNumber":"TRK-1"}}"#;
        let image = STANDARD.encode(b"%PDF-1.4");
        let label_reply = format!(r#"{{"Shipment":{{"LabelImage":"{image}"}}}}"#);
        let (mut client, _) = client(vec![body(warned), Some(label_reply)]);

        let tracking = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap();
        let mut sink = ResponseSink::new();
        let outcome = client.fetch_label(&tracking, &mut sink);

        assert_eq!(outcome.status, 200);
        assert_eq!(
            outcome.message,
            r#"Label TRK-1.pdf was downloaded to your device, Errors: ["ErrorLevel: 5 [ address normalized ]"]"#
        );
    }

    #[test]
    fn two_step_workflow_sends_expected_payloads() {
        let image = STANDARD.encode(b"%PDF-1.4 demo");
        let label_reply = format!(r#"{{"Shipment":{{"LabelImage":"{image}"}}}}"#);
        let (mut client, requests) = client(vec![
            body(r#"{"Shipment":{"TrackingNumber":"TRK-1"}}"#),
            Some(label_reply),
        ]);

        let tracking = client
            .create_shipment(&warsaw_to_berlin(), &params())
            .unwrap();
        assert_eq!(tracking, "TRK-1");

        let mut sink = ResponseSink::new();
        let outcome = client.fetch_label(&tracking, &mut sink);
        assert_eq!(
            outcome,
            Outcome::new(200, "Label TRK-1.pdf was downloaded to your device")
        );
        assert_eq!(sink.body(), b"%PDF-1.4 demo");

        let requests = requests.borrow();
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|r| r.url == "https://courier.test/?testMode=1" && r.content_type == "text/json"));

        let creation: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(creation["Apikey"], "test-key");
        assert_eq!(creation["Command"], "OrderShipment");
        assert_eq!(creation["Shipment"]["ConsignorAddress"]["City"], "Warsaw");
        assert_eq!(creation["Shipment"]["ConsigneeAddress"]["Country"], "DE");

        let retrieval: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
        assert_eq!(retrieval["Command"], "GetShipmentLabel");
        assert_eq!(retrieval["Shipment"]["TrackingNumber"], "TRK-1");
        assert_eq!(retrieval["Shipment"]["LabelFormat"], "PDF");
        assert_eq!(retrieval["Shipment"]["ShipperReference"], "");
    }
}
