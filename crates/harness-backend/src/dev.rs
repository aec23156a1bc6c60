use crate::{
    api::{
        client::{ApiClient, RawResponse},
        consts::JSON_CONTENT_TYPE,
    },
    errors::BackendError,
};
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use common::utils::find_available_port;
use std::{
    future::Future,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const GRAPHIQL_HTML: &str = include_str!("../assets/graphiql.html");
const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// a local server exposing the API through the credentials of a single login
///
/// requests posted to `/graphql` are authorized by the login's client, so a browser or any plain
/// GraphQL tool can explore the API without signing requests itself
pub struct DevServer {
    listener: TcpListener,
    client: ApiClient,
}

impl DevServer {
    /// binds the server to `127.0.0.1:<port>`, searching upwards for a free port if `search` is set
    pub async fn bind(client: ApiClient, port: u16, search: bool) -> Result<Self, BackendError> {
        let port = find_available_port(search, port, LOCALHOST).ok_or(if search {
            BackendError::AvailablePort
        } else {
            BackendError::PortInUse(port)
        })?;

        let address = SocketAddr::from((LOCALHOST, port));
        let listener = TcpListener::bind(address).await.map_err(BackendError::StartServer)?;

        Ok(Self { listener, client })
    }

    /// the port the server is listening on
    pub fn port(&self) -> Result<u16, BackendError> {
        self.listener
            .local_addr()
            .map(|address| address.port())
            .map_err(BackendError::StartServer)
    }

    /// serves requests until ctrl-c is received
    pub async fn serve(self) -> Result<(), BackendError> {
        self.serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// serves requests until `signal` completes
    pub async fn serve_with_shutdown(
        self,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), BackendError> {
        tracing::info!(port = self.port()?, "starting dev server");

        axum::serve(self.listener, router(self.client))
            .with_graceful_shutdown(signal)
            .await
            .map_err(BackendError::ServeError)
    }
}

/// the routes of the dev server
pub fn router(client: ApiClient) -> Router {
    Router::new()
        .route("/", get(graphiql))
        .route("/graphql", post(forward))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

async fn graphiql() -> Html<&'static str> {
    Html(GRAPHIQL_HTML)
}

async fn forward(State(client): State<ApiClient>, body: Bytes) -> Result<impl IntoResponse, BackendError> {
    tracing::trace!(bytes = body.len(), "forwarding request");

    let RawResponse { status, body } = client.run_raw(body.to_vec()).await?;

    tracing::trace!(%status, "forwarded request");

    Ok((status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::AuthMode;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tokio::sync::oneshot;
    use wiremock::{
        matchers::{body_json, header as header_matcher, method},
        Mock, MockServer, ResponseTemplate,
    };

    struct RunningServer {
        url: String,
        shutdown: Option<oneshot::Sender<()>>,
    }

    impl Drop for RunningServer {
        fn drop(&mut self) {
            if let Some(shutdown) = self.shutdown.take() {
                shutdown.send(()).ok();
            }
        }
    }

    async fn start(upstream: &MockServer) -> RunningServer {
        let client = ApiClient::new(
            &format!("{}/graphql", upstream.uri()),
            AuthMode::Bearer(SecretString::new("provider-token".to_owned())),
        )
        .unwrap();

        let server = DevServer::bind(client, 0, false).await.unwrap();
        let port = server.port().unwrap();
        let (sender, receiver) = oneshot::channel::<()>();

        tokio::spawn(server.serve_with_shutdown(async move {
            receiver.await.ok();
        }));

        RunningServer {
            url: format!("http://127.0.0.1:{port}"),
            shutdown: Some(sender),
        }
    }

    #[tokio::test]
    async fn graphql_requests_are_forwarded_with_the_login_authorization() {
        let upstream = MockServer::start().await;
        let request = json!({ "query": "query { self { userId } }" });
        let response = json!({ "data": { "self": { "userId": "us-east-1:abc" } } });

        Mock::given(method("POST"))
            .and(header_matcher("authorization", "provider-token"))
            .and(body_json(&request))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .expect(1)
            .mount(&upstream)
            .await;

        let server = start(&upstream).await;

        let forwarded = reqwest::Client::new()
            .post(format!("{}/graphql", server.url))
            .json(&request)
            .send()
            .await
            .unwrap();

        assert_eq!(forwarded.status(), 200);
        assert_eq!(forwarded.json::<Value>().await.unwrap(), response);
    }

    #[tokio::test]
    async fn upstream_errors_are_returned_verbatim() {
        let upstream = MockServer::start().await;
        let unauthorized = r#"{"errors":[{"errorType":"UnauthorizedException"}]}"#;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string(unauthorized))
            .mount(&upstream)
            .await;

        let server = start(&upstream).await;

        let forwarded = reqwest::Client::new()
            .post(format!("{}/graphql", server.url))
            .body("{}")
            .send()
            .await
            .unwrap();

        assert_eq!(forwarded.status(), 401);
        assert_eq!(forwarded.text().await.unwrap(), unauthorized);
    }

    #[tokio::test]
    async fn root_serves_graphiql() {
        let upstream = MockServer::start().await;
        let server = start(&upstream).await;

        let page = reqwest::get(&server.url).await.unwrap();

        assert_eq!(page.status(), 200);
        assert!(page.text().await.unwrap().contains("GraphiQL.createFetcher({ url: \"/graphql\" })"));
    }

    #[tokio::test]
    async fn occupied_port_is_reported() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupied.local_addr().unwrap().port();
        let client = ApiClient::new(
            "https://example.appsync-api.us-east-1.amazonaws.com/graphql",
            AuthMode::Bearer(SecretString::new("provider-token".to_owned())),
        )
        .unwrap();

        let error = DevServer::bind(client, port, false).await.err().unwrap();

        assert!(matches!(error, BackendError::PortInUse(reported) if reported == port));
    }
}
