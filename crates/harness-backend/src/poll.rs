//! Waiting on asynchronous side effects of the backend.
//!
//! Polling runs on tokio's clock at a fixed interval, without backoff or jitter. Every call site
//! names its own [`PollOptions`], and [`settle`] is the explicit wait for effects that have no
//! observable predicate.

use crate::api::{
    client::ApiClient,
    errors::ApiError,
    graphql::{
        enums::PostStatus,
        fragments::PostStatusFragment,
        queries::{PostArguments, PostStatusQuery},
    },
};
use cynic::QueryBuilder;
use std::{future::Future, time::Duration};
use thiserror::Error;
use tokio::time::{sleep, Instant};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(10_000);
pub const VIDEO_MAX_WAIT: Duration = Duration::from_millis(90_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// no check starts later than this after the first one
    pub max_wait: Duration,
    /// the pause between two checks
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL)
    }
}

impl PollOptions {
    pub const fn new(max_wait: Duration, interval: Duration) -> Self {
        Self { max_wait, interval }
    }

    /// for video transcoding
    pub const fn video() -> Self {
        Self::new(VIDEO_MAX_WAIT, DEFAULT_POLL_INTERVAL)
    }
}

#[derive(Error, Debug)]
pub enum PollError<E> {
    /// returned if the condition did not hold before the deadline
    #[error("timed out after {waited:?} waiting for {resource} to {condition}")]
    Timeout {
        resource: String,
        condition: String,
        waited: Duration,
    },

    /// returned if a check failed, polling stops at the first failure
    #[error(transparent)]
    Check(E),
}

/// runs `check` until it returns a value, waiting `options.interval` between calls
///
/// the last pause is shortened so that the final check runs at `options.max_wait` at the latest,
/// if that check comes back empty polling fails with [`PollError::Timeout`]
pub async fn poll_for<T, E, F, Fut>(
    resource: impl Into<String>,
    condition: impl Into<String>,
    options: PollOptions,
    mut check: F,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let started = Instant::now();

    loop {
        if let Some(value) = check().await.map_err(PollError::Check)? {
            return Ok(value);
        }

        let waited = started.elapsed();
        if waited >= options.max_wait {
            let (resource, condition) = (resource.into(), condition.into());
            tracing::debug!(%resource, %condition, ?waited, "gave up polling");
            return Err(PollError::Timeout {
                resource,
                condition,
                waited,
            });
        }

        sleep(options.interval.min(options.max_wait - waited)).await;
    }
}

/// runs `check` until it returns `true`, see [`poll_for`]
pub async fn poll_until<E, F, Fut>(
    resource: impl Into<String>,
    condition: impl Into<String>,
    options: PollOptions,
    mut check: F,
) -> Result<(), PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    poll_for(resource, condition, options, || {
        let pending = check();
        async move { pending.await.map(|done| done.then_some(())) }
    })
    .await
}

/// waits until the media of a post is processed, returning the post in its final status
pub async fn wait_for_post_processed(
    client: &ApiClient,
    post_id: &str,
    options: PollOptions,
) -> Result<PostStatusFragment, PollError<ApiError>> {
    let statuses: Vec<String> = PostStatus::TRANSIENT.iter().map(ToString::to_string).collect();

    poll_for(
        format!("post {post_id}"),
        format!("leave {}", statuses.join(", ")),
        options,
        move || async move {
            let response = client
                .run(PostStatusQuery::build(PostArguments {
                    post_id: cynic::Id::new(post_id),
                }))
                .await?;
            Ok::<_, ApiError>(response.post.filter(|post| !post.post_status.is_transient()))
        },
    )
    .await
}

/// waits a fixed, named amount of time for effects without an observable predicate
pub async fn settle(duration: Duration) {
    tracing::debug!(?duration, "waiting for the backend to settle");
    sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::client::AuthMode, test_support::post_status_json};
    use secrecy::SecretString;
    use serde_json::json;
    use std::{
        convert::Infallible,
        sync::atomic::{AtomicUsize, Ordering},
    };
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    const SECOND: Duration = Duration::from_millis(1000);

    #[tokio::test(start_paused = true)]
    async fn resolves_on_the_third_check() {
        let checks = &AtomicUsize::new(0);
        let started = Instant::now();

        let options = PollOptions::new(3 * SECOND, SECOND);
        let result = poll_until("post", "complete", options, move || async move {
            Ok::<_, Infallible>(checks.fetch_add(1, Ordering::SeqCst) == 2)
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(checks.load(Ordering::SeqCst), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= 2 * SECOND && elapsed <= 3 * SECOND);
    }

    #[tokio::test(start_paused = true)]
    async fn performs_the_minimum_number_of_checks() {
        let checks = &AtomicUsize::new(0);
        let started = Instant::now();
        let time_to_true = Duration::from_millis(2500);

        poll_until("post", "complete", PollOptions::default(), move || async move {
            checks.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(started.elapsed() >= time_to_true)
        })
        .await
        .unwrap();

        // ceil(2500 / 1000) + 1
        assert_eq!(checks.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_and_stops_checking() {
        let checks = &AtomicUsize::new(0);

        let options = PollOptions::new(3 * SECOND, SECOND);
        let error = poll_until("post abc", "leave PENDING", options, move || async move {
            checks.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(false)
        })
        .await
        .unwrap_err();

        let PollError::Timeout {
            resource,
            condition,
            waited,
        } = error
        else {
            unreachable!("checks are infallible");
        };
        assert_eq!(resource, "post abc");
        assert_eq!(condition, "leave PENDING");
        assert!(waited >= 3 * SECOND);
        assert_eq!(checks.load(Ordering::SeqCst), 4);

        sleep(10 * SECOND).await;
        assert_eq!(checks.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn never_checks_past_the_deadline() {
        let started = Instant::now();
        let checked_at = &std::sync::Mutex::new(Vec::new());

        let options = PollOptions::new(3 * SECOND, 2 * SECOND);
        let error = poll_until("post", "complete", options, move || async move {
            checked_at.lock().unwrap().push(started.elapsed());
            Ok::<_, Infallible>(false)
        })
        .await
        .unwrap_err();

        let checked_at = checked_at.lock().unwrap().clone();
        assert_eq!(checked_at.len(), 3);
        assert!(checked_at.iter().all(|elapsed| *elapsed <= 3 * SECOND), "{checked_at:?}");
        assert!(checked_at[2] > 2 * SECOND);

        let PollError::Timeout { waited, .. } = error else {
            unreachable!("checks are infallible");
        };
        assert!(waited >= 3 * SECOND && waited < 4 * SECOND);
    }

    #[tokio::test(start_paused = true)]
    async fn check_failures_stop_polling() {
        let checks = &AtomicUsize::new(0);

        let error = poll_until("post", "complete", PollOptions::default(), move || async move {
            checks.fetch_add(1, Ordering::SeqCst);
            Err::<bool, _>("backend unavailable")
        })
        .await
        .unwrap_err();

        assert!(matches!(error, PollError::Check("backend unavailable")));
        assert_eq!(checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_waits_the_given_duration() {
        let started = Instant::now();

        settle(5 * SECOND).await;

        assert!(started.elapsed() >= 5 * SECOND);
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &format!("{}/graphql", server.uri()),
            AuthMode::Bearer(SecretString::new("token".to_owned())),
        )
        .unwrap()
    }

    fn status_response(status: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({ "data": { "post": post_status_json("post-1", status) } }))
    }

    #[tokio::test]
    async fn waits_until_the_post_leaves_processing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(status_response("PROCESSING"))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(status_response("COMPLETED"))
            .mount(&server)
            .await;

        let post = wait_for_post_processed(
            &client(&server),
            "post-1",
            PollOptions::new(Duration::from_secs(5), Duration::from_millis(10)),
        )
        .await
        .unwrap();

        assert_eq!(post.post_status, PostStatus::Completed);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn timeout_names_the_post_and_its_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(status_response("PENDING"))
            .mount(&server)
            .await;

        let error = wait_for_post_processed(
            &client(&server),
            "post-1",
            PollOptions::new(Duration::from_millis(50), Duration::from_millis(10)),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error.to_string().split(" waiting for ").nth(1),
            Some("post post-1 to leave PENDING, PROCESSING")
        );
    }
}
