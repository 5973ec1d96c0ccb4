//! Server-Sent Events (SSE) stream of door events.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use garagehub_app::ports::{OpenNotifier, StateStore};

use crate::state::AppState;

/// `GET /api/events/stream` — SSE stream of door events.
///
/// Every transition, including auto-close, is sent as a JSON `data:` frame
/// with the event kind as the SSE event name. The stream continues until the
/// client disconnects.
pub async fn stream<S, N>(
    State(state): State<AppState<S, N>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
{
    let event_rx = state.event_bus.subscribe();
    let event_stream = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => match Event::default().event(kind_name(&event)).json_data(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize door event for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

fn kind_name(event: &garagehub_domain::event::DoorEvent) -> &'static str {
    use garagehub_domain::event::DoorEventKind;

    match event.kind {
        DoorEventKind::Opened => "opened",
        DoorEventKind::Closed => "closed",
        DoorEventKind::AutoClosed => "auto_closed",
    }
}
