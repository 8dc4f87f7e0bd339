/* src/server/adapter/axum/src/handler/reload.rs */

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use crate::LiveReload;

pub(super) async fn handle_live_reload(
  State(reload): State<LiveReload>,
  ws: WebSocketUpgrade,
) -> Response {
  ws.on_upgrade(move |socket| relay_reloads(reload, socket))
}

/// Push a `reload` frame for every signal until the browser goes away.
async fn relay_reloads(reload: LiveReload, mut socket: WebSocket) {
  let mut rx = reload.subscribe();
  loop {
    tokio::select! {
      signal = rx.recv() => match signal {
        Ok(()) | Err(RecvError::Lagged(_)) => {
          if socket.send(Message::Text("reload".into())).await.is_err() {
            break;
          }
        }
        Err(RecvError::Closed) => break,
      },
      incoming = socket.recv() => match incoming {
        Some(Ok(_)) => {}
        Some(Err(_)) | None => break,
      },
    }
  }
  debug!("live reload client disconnected");
}
