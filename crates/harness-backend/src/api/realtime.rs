//! Subscriptions over the managed realtime websocket.
//!
//! One background task per connection owns the socket. Every subscription gets its own channel,
//! so events of one subscription are never observed through another. Dropping a [`Subscription`]
//! or calling [`Subscription::unsubscribe`] stops delivery.

use super::{
    client::ApiClient,
    consts::{REALTIME_ACK_TIMEOUT, REALTIME_CONNECT_PATH, REALTIME_EMPTY_PAYLOAD, REALTIME_PROTOCOL},
    errors::ApiError,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use cynic::{GraphQlResponse, StreamingOperation};
use futures_util::{SinkExt, StreamExt};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::{collections::HashMap, marker::PhantomData, time::Duration};
use tokio::{
    net::TcpStream,
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::timeout,
};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{client::IntoClientRequest, http::HeaderValue, Message},
    MaybeTlsStream, WebSocketStream,
};
use url::Url;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type EventSender = mpsc::UnboundedSender<Result<Value, ApiError>>;

/// a frame of the realtime protocol
#[derive(Serialize, Deserialize, Debug)]
struct Frame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl Frame {
    fn new(kind: &str, id: Option<String>, payload: Option<Value>) -> Self {
        Self {
            kind: kind.to_owned(),
            id,
            payload,
        }
    }

    fn into_message(self) -> Result<Message, ApiError> {
        serde_json::to_string(&self)
            .map(Message::Text)
            .map_err(ApiError::Serialize)
    }
}

enum Command {
    Start {
        id: String,
        payload: Value,
        acknowledged: oneshot::Sender<Result<(), ApiError>>,
        events: EventSender,
    },
    Stop {
        id: String,
    },
}

/// a connection to the realtime endpoint of the backend
pub struct RealtimeClient {
    api: ApiClient,
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
    ack_timeout: Duration,
}

impl RealtimeClient {
    /// opens the realtime websocket with the identity of `api` and waits for the connection ack
    pub async fn connect(api: &ApiClient) -> Result<Self, ApiError> {
        // either provider may already be installed by another connection
        let _ = rustls::crypto::ring::default_provider().install_default();

        let headers = api.authorization_headers(REALTIME_CONNECT_PATH, "{}")?;
        let header = STANDARD.encode(serde_json::to_vec(&headers).map_err(ApiError::Serialize)?);

        let mut url = realtime_url(api.endpoint())?;
        url.query_pairs_mut()
            .append_pair("header", &header)
            .append_pair("payload", REALTIME_EMPTY_PAYLOAD);

        let mut request = url.as_str().into_client_request()?;
        request
            .headers_mut()
            .insert("Sec-WebSocket-Protocol", HeaderValue::from_static(REALTIME_PROTOCOL));

        tracing::debug!(host = url.host_str().unwrap_or_default(), "connecting to the realtime endpoint");

        let (mut socket, _) = connect_async(request).await?;

        socket
            .send(Frame::new("connection_init", None, None).into_message()?)
            .await?;

        timeout(REALTIME_ACK_TIMEOUT, wait_for_connection_ack(&mut socket))
            .await
            .map_err(|_| ApiError::Realtime("timed out waiting for connection_ack".to_owned()))??;

        let (commands, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_connection(socket, receiver));

        Ok(Self {
            api: api.clone(),
            commands,
            task,
            ack_timeout: REALTIME_ACK_TIMEOUT,
        })
    }

    /// how long [`RealtimeClient::subscribe`] waits for the endpoint to acknowledge a subscription
    pub fn with_ack_timeout(mut self, ack_timeout: Duration) -> Self {
        self.ack_timeout = ack_timeout;
        self
    }

    /// starts a subscription and waits until the endpoint acknowledges it
    ///
    /// an unacknowledged subscription is stopped again once the ack timeout has passed
    pub async fn subscribe<ResponseData, Variables>(
        &self,
        operation: StreamingOperation<ResponseData, Variables>,
    ) -> Result<Subscription<ResponseData>, ApiError>
    where
        ResponseData: DeserializeOwned + 'static,
        Variables: Serialize,
    {
        let data = serde_json::to_string(&operation).map_err(ApiError::Serialize)?;
        let authorization = self.api.authorization_headers(self.api.endpoint().path(), &data)?;

        let id = uuid::Uuid::new_v4().to_string();
        let (acknowledged, acknowledgement) = oneshot::channel();
        let (events, receiver) = mpsc::unbounded_channel();

        self.commands
            .send(Command::Start {
                id: id.clone(),
                payload: json!({
                    "data": data,
                    "extensions": { "authorization": authorization },
                }),
                acknowledged,
                events,
            })
            .map_err(|_| ApiError::RealtimeClosed)?;

        match timeout(self.ack_timeout, acknowledgement).await {
            Ok(acknowledged) => acknowledged.map_err(|_| ApiError::RealtimeClosed)??,
            Err(_) => {
                let _ = self.commands.send(Command::Stop { id });
                return Err(ApiError::Realtime("timed out waiting for start_ack".to_owned()));
            }
        }

        tracing::debug!(%id, "subscription started");

        Ok(Subscription {
            id,
            events: receiver,
            commands: self.commands.clone(),
            response: PhantomData,
        })
    }

    /// closes the websocket, ending every subscription of this connection
    pub fn close(self) {
        self.task.abort();
    }
}

/// the events of one subscription
pub struct Subscription<ResponseData> {
    id: String,
    events: mpsc::UnboundedReceiver<Result<Value, ApiError>>,
    commands: mpsc::UnboundedSender<Command>,
    response: PhantomData<fn() -> ResponseData>,
}

impl<ResponseData: DeserializeOwned> Subscription<ResponseData> {
    /// waits for the next event, `None` once the subscription or its connection ended
    pub async fn next(&mut self) -> Option<Result<ResponseData, ApiError>> {
        let event = self.events.recv().await?;
        Some(event.and_then(decode_event))
    }

    /// stops the subscription, no event is delivered afterwards
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<ResponseData> Drop for Subscription<ResponseData> {
    fn drop(&mut self) {
        self.events.close();
        let _ = self.commands.send(Command::Stop {
            id: std::mem::take(&mut self.id),
        });
    }
}

fn decode_event<ResponseData: DeserializeOwned>(payload: Value) -> Result<ResponseData, ApiError> {
    let response: GraphQlResponse<ResponseData> = serde_json::from_value(payload).map_err(ApiError::Decode)?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        return Err(ApiError::Graphql(errors.into_iter().map(|error| error.message).collect()));
    }

    response.data.ok_or(ApiError::EmptyResponse)
}

async fn wait_for_connection_ack(socket: &mut Socket) -> Result<(), ApiError> {
    while let Some(message) = socket.next().await {
        let Some(frame) = parse_frame(message?) else {
            continue;
        };
        match frame.kind.as_str() {
            "connection_ack" => return Ok(()),
            "ka" => continue,
            "connection_error" => return Err(ApiError::Realtime(error_text(frame.payload))),
            other => tracing::warn!(kind = other, "unexpected frame before connection_ack"),
        }
    }
    Err(ApiError::RealtimeClosed)
}

async fn run_connection(mut socket: Socket, mut commands: mpsc::UnboundedReceiver<Command>) {
    let mut pending: HashMap<String, oneshot::Sender<Result<(), ApiError>>> = HashMap::new();
    let mut subscribers: HashMap<String, EventSender> = HashMap::new();

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                let frame = match command {
                    Command::Start { id, payload, acknowledged, events } => {
                        pending.insert(id.clone(), acknowledged);
                        subscribers.insert(id.clone(), events);
                        Frame::new("start", Some(id), Some(payload))
                    }
                    Command::Stop { id } => {
                        pending.remove(&id);
                        subscribers.remove(&id);
                        Frame::new("stop", Some(id), None)
                    }
                };
                let sent = match frame.into_message() {
                    Ok(message) => socket.send(message).await.map_err(ApiError::from),
                    Err(error) => Err(error),
                };
                if let Err(error) = sent {
                    tracing::warn!(%error, "could not send a realtime frame");
                    break;
                }
            }
            message = socket.next() => {
                let message = match message {
                    Some(Ok(message)) => message,
                    Some(Err(error)) => {
                        tracing::warn!(%error, "realtime connection failed");
                        break;
                    }
                    None => break,
                };
                if let Message::Ping(payload) = &message {
                    if socket.send(Message::Pong(payload.clone())).await.is_err() {
                        break;
                    }
                    continue;
                }
                if matches!(message, Message::Close(_)) {
                    break;
                }
                let Some(frame) = parse_frame(message) else { continue };
                dispatch(frame, &mut pending, &mut subscribers);
            }
        }
    }

    for (_, acknowledged) in pending.drain() {
        let _ = acknowledged.send(Err(ApiError::RealtimeClosed));
    }
    tracing::debug!(subscriptions = subscribers.len(), "realtime connection closed");
}

fn dispatch(
    frame: Frame,
    pending: &mut HashMap<String, oneshot::Sender<Result<(), ApiError>>>,
    subscribers: &mut HashMap<String, EventSender>,
) {
    let id = frame.id.unwrap_or_default();

    match frame.kind.as_str() {
        "ka" => tracing::trace!("keep alive"),
        "start_ack" => {
            if let Some(acknowledged) = pending.remove(&id) {
                let _ = acknowledged.send(Ok(()));
            }
        }
        "data" => match (subscribers.get(&id), frame.payload) {
            (Some(events), Some(payload)) => {
                if events.send(Ok(payload)).is_err() {
                    subscribers.remove(&id);
                }
            }
            _ => tracing::trace!(%id, "data for an unknown subscription"),
        },
        "error" => {
            let error = ApiError::Realtime(error_text(frame.payload));
            if let Some(acknowledged) = pending.remove(&id) {
                subscribers.remove(&id);
                let _ = acknowledged.send(Err(error));
            } else if let Some(events) = subscribers.get(&id) {
                let _ = events.send(Err(error));
            }
        }
        "complete" => {
            subscribers.remove(&id);
        }
        other => tracing::warn!(kind = other, %id, "unexpected realtime frame"),
    }
}

fn parse_frame(message: Message) -> Option<Frame> {
    let Message::Text(text) = message else {
        return None;
    };
    tracing::trace!(frame = %text, "realtime frame received");
    match serde_json::from_str(&text) {
        Ok(frame) => Some(frame),
        Err(error) => {
            tracing::warn!(%error, "could not parse a realtime frame");
            None
        }
    }
}

fn error_text(payload: Option<Value>) -> String {
    let Some(payload) = payload else {
        return "unknown error".to_owned();
    };
    payload
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| {
                    error
                        .get("message")
                        .or_else(|| error.get("errorType"))
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_owned()
                })
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_else(|| payload.to_string())
}

/// the websocket url serving subscriptions for a GraphQL endpoint
///
/// managed endpoints move to the `appsync-realtime-api` host, custom domains serve realtime
/// under `/graphql/realtime`
pub(crate) fn realtime_url(endpoint: &Url) -> Result<Url, ApiError> {
    let invalid = || ApiError::InvalidEndpoint(endpoint.to_string());
    let host = endpoint.host_str().ok_or_else(invalid)?;

    let mut url = endpoint.clone();
    url.set_query(None);

    if host.contains(".appsync-api.") {
        url.set_host(Some(&host.replacen(".appsync-api.", ".appsync-realtime-api.", 1)))
            .map_err(|_| invalid())?;
    } else if endpoint.scheme() == "https" {
        url.set_path(&format!("{}/realtime", endpoint.path().trim_end_matches('/')));
    }

    let scheme = if endpoint.scheme() == "https" { "wss" } else { "ws" };
    url.set_scheme(scheme).map_err(|()| invalid())?;

    Ok(url)
}
