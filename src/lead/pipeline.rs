use std::fmt;

use chrono::{SecondsFormat, Utc};
use gloo_net::http::Request;
use log::{debug, warn};
use serde::Serialize;
use web_sys::window;

use crate::config;
use crate::lead::attribution::{AttributionCapture, ATTRIBUTION_KEYS};
use crate::lead::form::{validate, FormConfig, FormValues};
use crate::lead::store::ParamStore;

pub const STATUS_SUCCESS: &str = "Form submitted successfully!";
pub const STATUS_FAILURE: &str = "Something went wrong. Please try again.";

/// Client-side metadata attached to every submission.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct ClientMeta {
    pub timestamp: String,
    pub user_agent: String,
    pub referrer: String,
}

impl ClientMeta {
    /// Snapshot of the current browser context. Anything unavailable becomes
    /// an empty string.
    pub fn from_window() -> Self {
        let user_agent = window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default();
        let referrer = window()
            .and_then(|w| w.document())
            .map(|d| d.referrer())
            .unwrap_or_default();
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            user_agent,
            referrer,
        }
    }
}

/// The finalized, normalized payload sent to the sheet endpoint. Built only
/// after validation passes; discarded after delivery.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SubmissionRecord {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub looking_for: String,
    pub budget: String,
    pub attribution: Vec<(&'static str, String)>,
    pub meta: ClientMeta,
}

impl SubmissionRecord {
    fn build(
        values: &FormValues,
        attribution: &AttributionCapture,
        store: &dyn ParamStore,
        meta: ClientMeta,
    ) -> Self {
        Self {
            full_name: values.full_name.trim().to_string(),
            phone: values.phone.clone(),
            email: values.email.trim().to_lowercase(),
            looking_for: values.looking_for.clone(),
            budget: values.budget.clone(),
            attribution: ATTRIBUTION_KEYS
                .iter()
                .map(|key| (*key, attribution.resolve(key, store)))
                .collect(),
            meta,
        }
    }

    /// Flat key/value view in wire order. Absent attribution values stay in
    /// as empty strings rather than being omitted.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = vec![
            ("fullName", self.full_name.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("lookingFor", self.looking_for.as_str()),
            ("budget", self.budget.as_str()),
        ];
        for (key, value) in &self.attribution {
            pairs.push((key, value.as_str()));
        }
        pairs.push(("timestamp", self.meta.timestamp.as_str()));
        pairs.push(("userAgent", self.meta.user_agent.as_str()));
        pairs.push(("referrer", self.meta.referrer.as_str()));
        pairs
    }

    /// application/x-www-form-urlencoded body for the Apps Script endpoint.
    pub fn to_form_body(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Why a submit attempt was refused before any network activity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitBlocked {
    /// The ruleset reported at least one error.
    Invalid,
    /// A previous delivery has not settled yet.
    InFlight,
}

/// The outbound call failed locally before the request left the client. The
/// opaque delivery mode gives no finer detail than the error text.
#[derive(Clone, PartialEq, Debug)]
pub struct DeliveryError(pub String);

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delivery failed: {}", self.0)
    }
}

/// UI directive produced when a delivery settles.
#[derive(Clone, PartialEq, Debug)]
pub enum Settled {
    /// Reset the form, show the success status, navigate to confirmation.
    Delivered { status: &'static str },
    /// Keep the form values so the user can retry; show the failure status.
    Failed { status: &'static str },
}

/// Submit-side state machine. `begin` gates on validation and the in-flight
/// flag and produces the record; `finish` settles the flag and tells the
/// page what to do. The flag is flipped synchronously inside `begin`, before
/// any async work, so at most one delivery is in flight per form instance.
pub struct SubmissionPipeline {
    config: FormConfig,
    in_flight: bool,
}

impl SubmissionPipeline {
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            in_flight: false,
        }
    }

    pub fn begin(
        &mut self,
        values: &FormValues,
        attribution: &AttributionCapture,
        store: &dyn ParamStore,
        meta: ClientMeta,
    ) -> Result<SubmissionRecord, SubmitBlocked> {
        if self.in_flight {
            return Err(SubmitBlocked::InFlight);
        }
        if !validate(values, &self.config).is_empty() {
            return Err(SubmitBlocked::Invalid);
        }
        self.in_flight = true;
        Ok(SubmissionRecord::build(values, attribution, store, meta))
    }

    pub fn finish(&mut self, outcome: Result<(), DeliveryError>) -> Settled {
        self.in_flight = false;
        match outcome {
            Ok(()) => Settled::Delivered {
                status: STATUS_SUCCESS,
            },
            Err(err) => {
                warn!("{}", err);
                Settled::Failed {
                    status: STATUS_FAILURE,
                }
            }
        }
    }
}

/// Single fire-and-forget POST to the sheet endpoint. The request runs in
/// no-cors mode, so the response is opaque: "did not throw" is the only
/// success signal, and the remote status is never read.
pub async fn deliver(record: &SubmissionRecord) -> Result<(), DeliveryError> {
    debug!(
        "submitting lead: {}",
        serde_json::to_string(record).unwrap_or_default()
    );
    Request::post(config::get_leads_endpoint())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .mode(web_sys::RequestMode::NoCors)
        .body(record.to_form_body())
        .send()
        .await
        .map(|_| ())
        .map_err(|e| DeliveryError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::attribution::AttributionCapture;
    use crate::lead::store::testing::MemoryStore;

    fn meta() -> ClientMeta {
        ClientMeta {
            timestamp: "2025-06-01T12:00:00Z".to_string(),
            user_agent: "test-agent".to_string(),
            referrer: String::new(),
        }
    }

    fn valid_values() -> FormValues {
        FormValues {
            full_name: "Jane Doe".to_string(),
            phone: "12025551234".to_string(),
            email: " Jane@Example.com ".to_string(),
            looking_for: "Villa".to_string(),
            budget: "Under $500,000".to_string(),
            terms: false,
        }
    }

    fn empty_capture(store: &MemoryStore) -> AttributionCapture {
        AttributionCapture::capture(Vec::new(), store)
    }

    #[test]
    fn begin_normalizes_name_and_email() {
        let store = MemoryStore::new();
        let capture = empty_capture(&store);
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());

        let record = pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .unwrap();

        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.email, "jane@example.com");
    }

    #[test]
    fn unset_attribution_keys_are_present_as_empty_strings() {
        let store = MemoryStore::new();
        let capture = empty_capture(&store);
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());

        let record = pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .unwrap();
        let pairs = record.pairs();

        for key in ATTRIBUTION_KEYS {
            assert!(
                pairs.iter().any(|(k, v)| *k == key && v.is_empty()),
                "{} missing from the wire pairs",
                key
            );
        }
    }

    #[test]
    fn resolved_attribution_flows_into_the_record() {
        let store = MemoryStore::with(&[("utm_campaign", "spring-launch")]);
        let capture = AttributionCapture::capture(
            vec![("gclid".to_string(), "abc123".to_string())],
            &store,
        );
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());

        let record = pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .unwrap();

        let get = |key: &str| {
            record
                .pairs()
                .into_iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
                .unwrap()
        };
        assert_eq!(get("gclid"), "abc123");
        assert_eq!(get("utm_campaign"), "spring-launch");
    }

    #[test]
    fn form_body_is_urlencoded_in_wire_order() {
        let store = MemoryStore::new();
        let capture = empty_capture(&store);
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());

        let record = pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .unwrap();
        let body = record.to_form_body();

        assert!(body.starts_with("fullName=Jane%20Doe&phone=12025551234&email=jane%40example.com"));
        assert!(body.contains("budget=Under%20%24500%2C000"));
        assert!(body.contains("utm_ad=&utm_placement="));
        assert!(body.contains("timestamp=2025-06-01T12%3A00%3A00Z"));
        assert!(body.ends_with("userAgent=test-agent&referrer="));
    }

    #[test]
    fn invalid_values_block_submission_with_no_record() {
        let store = MemoryStore::new();
        let capture = empty_capture(&store);
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());

        for values in [
            FormValues::default(),
            FormValues {
                email: "not-an-email".to_string(),
                ..valid_values()
            },
            FormValues {
                phone: "555".to_string(),
                ..valid_values()
            },
        ] {
            assert_eq!(
                pipeline.begin(&values, &capture, &store, meta()),
                Err(SubmitBlocked::Invalid)
            );
        }

        // a blocked attempt leaves the pipeline usable
        assert!(pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .is_ok());
    }

    #[test]
    fn at_most_one_delivery_in_flight() {
        let store = MemoryStore::new();
        let capture = empty_capture(&store);
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());

        assert!(pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .is_ok());
        assert_eq!(
            pipeline.begin(&valid_values(), &capture, &store, meta()),
            Err(SubmitBlocked::InFlight)
        );

        pipeline.finish(Ok(()));
        assert!(pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .is_ok());
    }

    #[test]
    fn success_directs_reset_and_navigation() {
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());
        let store = MemoryStore::new();
        let capture = empty_capture(&store);
        pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .unwrap();

        assert_eq!(
            pipeline.finish(Ok(())),
            Settled::Delivered {
                status: STATUS_SUCCESS
            }
        );
    }

    #[test]
    fn failure_keeps_the_form_and_sets_a_retry_status() {
        let mut pipeline = SubmissionPipeline::new(FormConfig::default());
        let store = MemoryStore::new();
        let capture = empty_capture(&store);
        pipeline
            .begin(&valid_values(), &capture, &store, meta())
            .unwrap();

        let settled = pipeline.finish(Err(DeliveryError("network down".to_string())));
        assert_eq!(
            settled,
            Settled::Failed {
                status: STATUS_FAILURE
            }
        );
    }
}
