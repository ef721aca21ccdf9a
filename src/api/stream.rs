//! Streaming session relay
//!
//! One session per connection: subscribe to the hub, emit a connection
//! event immediately, then relay published events in arrival order. An
//! idle gap of one heartbeat interval produces a heartbeat frame so
//! intermediary proxies keep the connection open. When the transport
//! drops the stream, the subscriber guard deregisters the session from
//! the hub; nothing lingers.

use super::events::{Event, EventHub};
use std::time::Duration;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};

/// Build the event stream for one streaming session
///
/// The hub registration lives exactly as long as the returned stream.
/// If the hub drops the session for falling behind, the stream ends
/// after draining, closing the connection.
pub fn session_stream(
    hub: &EventHub,
    heartbeat_interval: Duration,
) -> impl Stream<Item = Event> + Send {
    let (guard, rx) = hub.subscribe();

    let live = ReceiverStream::new(rx)
        .timeout(heartbeat_interval)
        .map(move |item| {
            // the guard rides along so the subscription is released only
            // when the transport drops this stream
            let _registration = &guard;
            match item {
                Ok(event) => event,
                Err(_) => Event::heartbeat(),
            }
        });

    tokio_stream::iter([Event::connection()]).chain(live)
}
