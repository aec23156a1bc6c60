use super::errors::ProvisioningError;
use crate::api::signing::{AwsCredentials, SigV4Signer};
use chrono::{SecondsFormat, Utc};
use common::environment::Environment;
use reqwest::header;
use serde_json::json;
use url::Url;

const ANALYTICS_SERVICE: &str = "mobiletargeting";
const JSON_CONTENT_TYPE: &str = "application/json";

/// the authentication events reported for test accounts
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub enum AuthEvent {
    #[strum(serialize = "_userauth.sign_up")]
    SignUp,
    #[strum(serialize = "_userauth.sign_in")]
    SignIn,
}

/// records events in the analytics application, signed with the identity's own credentials
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    http: reqwest::Client,
    endpoint: Url,
    application_id: String,
    region: String,
}

impl AnalyticsClient {
    pub fn new(application_id: &str, region: &str) -> Result<Self, ProvisioningError> {
        let endpoint = Url::parse(&format!("https://pinpoint.{region}.amazonaws.com/"))
            .map_err(|error| ProvisioningError::RequestError(format!("invalid region '{region}': {error}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            application_id: application_id.to_owned(),
            region: region.to_owned(),
        })
    }

    /// `None` when no analytics application is configured
    pub fn from_environment(environment: &Environment) -> Result<Option<Self>, ProvisioningError> {
        match environment.analytics_application_id() {
            Some(application_id) => Ok(Some(Self::new(application_id, environment.region()?)?)),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// records a single event for the endpoint of the given identity
    pub async fn record_event(
        &self,
        credentials: &AwsCredentials,
        endpoint_id: &str,
        event: AuthEvent,
    ) -> Result<(), ProvisioningError> {
        let mut url = self.endpoint.clone();
        url.set_path(&format!("/v1/apps/{}/events", self.application_id));

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let event_id = uuid::Uuid::new_v4().to_string();
        let body = json!({
            "BatchItem": {
                endpoint_id: {
                    "Endpoint": {},
                    "Events": {
                        event_id: {
                            "EventType": event.as_ref(),
                            "Timestamp": timestamp,
                        }
                    }
                }
            }
        })
        .to_string();

        let signer = SigV4Signer::new(credentials, &self.region, ANALYTICS_SERVICE);
        let headers = signer.sign(
            "POST",
            &url,
            &[(header::CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE)],
            body.as_bytes(),
        );

        let mut request = self.http.post(url).header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
        for (name, value) in headers.into_iter().filter(|(name, _)| name != "host") {
            request = request.header(name, value);
        }

        let response = request.body(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ProvisioningError::Rejected {
                operation: "PutEvents",
                kind: status.to_string(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        tracing::debug!(%event, endpoint_id, "recorded analytics event");
        Ok(())
    }
}
