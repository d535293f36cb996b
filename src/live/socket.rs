use std::sync::Arc;

use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use actix_ws::Message;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::live::hub::RoundHub;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ClientFrame {
    #[serde(rename = "subscribe")]
    Subscribe {
        #[serde(rename = "roundId")]
        round_id: Value,
    },
    #[serde(rename = "scoreUpdate")]
    ScoreUpdate { payload: Value },
}

// Round ids arrive as JSON numbers from the scorecard UI, but the registry
// accepts any scalar; strings key as-is, everything else by its JSON text.
fn round_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub async fn ws_entry(
    req: HttpRequest,
    stream: web::Payload,
    hub: Data<RoundHub>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;
    actix_web::rt::spawn(run_session(hub.into_inner(), session, msg_stream));
    Ok(response)
}

async fn run_session(
    hub: Arc<RoundHub>,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) {
    let session_id = hub.next_session_id();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    loop {
        tokio::select! {
            Some(outbound) = rx.recv() => {
                // A peer's scoreUpdate payload, relayed without envelope.
                if session.text(outbound).await.is_err() {
                    break;
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientFrame>(&text) {
                            Ok(ClientFrame::Subscribe { round_id }) => {
                                hub.subscribe(session_id, &round_key(&round_id), tx.clone())
                                    .await;
                            }
                            Ok(ClientFrame::ScoreUpdate { payload }) => {
                                if let Ok(raw) = serde_json::to_string(&payload) {
                                    hub.relay(session_id, &raw).await;
                                }
                            }
                            // Unrecognized frames are dropped silently.
                            Err(_) => {}
                        }
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    hub.disconnect(session_id).await;
    let _ = session.close(None).await;
}
