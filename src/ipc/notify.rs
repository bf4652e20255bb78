//! Background listener for the notification socket.
//!
//! [`NotificationStream`] keeps a second connection open, decodes every
//! NUL-delimited JSON frame and forwards the interesting ones as
//! [`Trigger::Notification`].  Any resolve, connect or read failure drops
//! the connection, waits
//! [`retry_interval`](NotificationStream::with_retry_interval), locates the
//! socket again and redials, forever.  Consumers only ever see decoded
//! events.

use super::event::NotificationEvent;
use super::frame::read_frame;
use crate::scheduler::Trigger;
use crate::traits::{Environment, TriggerSource};
use crate::wingo::resolve::{Resolver, SocketKind};
use log::{debug, info, warn};
use std::convert::Infallible;
use std::io::BufReader;
use std::os::unix::net::UnixStream;
use std::sync::mpsc;
use std::time::Duration;

/// Default pause between a dropped connection and the next dial.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Lifecycle of the notification connection.
enum ConnectionState {
    Disconnected,
    Connecting,
    Connected(BufReader<UnixStream>),
}

/// A [`TriggerSource`] reading the window manager's notification socket.
///
/// The socket path is resolved afresh on every connection attempt, so a
/// restarted window manager is found even if its socket moved.
pub struct NotificationStream<E: Environment> {
    resolver: Resolver<E>,
    retry_interval: Duration,
}

impl<E: Environment> NotificationStream<E> {
    pub fn new(resolver: Resolver<E>) -> Self {
        Self {
            resolver,
            retry_interval: RETRY_INTERVAL,
        }
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    fn connect(&self) -> ConnectionState {
        let path = match self.resolver.resolve(SocketKind::Notification) {
            Ok(p) => p,
            Err(e) => {
                warn!("{}", e);
                return ConnectionState::Disconnected;
            }
        };
        match UnixStream::connect(&path) {
            Ok(stream) => {
                info!("notification stream connected to {}", path.display());
                ConnectionState::Connected(BufReader::new(stream))
            }
            Err(e) => {
                warn!("cannot reach {}: {}", path.display(), e);
                ConnectionState::Disconnected
            }
        }
    }

    /// Advance the connection by one step.
    ///
    /// Returns `None` once the sink has hung up.
    fn step(
        &self,
        state: ConnectionState,
        sink: &mpsc::Sender<Trigger>,
    ) -> Option<ConnectionState> {
        let next = match state {
            ConnectionState::Disconnected => {
                std::thread::sleep(self.retry_interval);
                ConnectionState::Connecting
            }
            ConnectionState::Connecting => self.connect(),
            ConnectionState::Connected(mut reader) => match read_frame(&mut reader) {
                Ok(Some(payload)) => {
                    if let Some(event) = filter_payload(&payload) {
                        debug!("notification: {}", event.name);
                        if sink.send(Trigger::Notification(event)).is_err() {
                            info!("sink closed, stopping notification stream");
                            return None;
                        }
                    }
                    ConnectionState::Connected(reader)
                }
                Ok(None) => {
                    warn!("notification socket closed by peer");
                    ConnectionState::Disconnected
                }
                Err(e) => {
                    warn!("notification read error: {}", e);
                    ConnectionState::Disconnected
                }
            },
        };
        Some(next)
    }
}

/// Decode a payload and drop heartbeats, malformed frames and objects
/// without a discriminator.
pub(crate) fn filter_payload(payload: &str) -> Option<NotificationEvent> {
    match NotificationEvent::from_payload(payload) {
        Ok(Some(event)) if event.is_noop() => None,
        Ok(Some(event)) => Some(event),
        Ok(None) => None,
        Err(e) => {
            warn!("discarding malformed notification {:?}: {}", payload, e);
            None
        }
    }
}

impl<E: Environment + Send> TriggerSource for NotificationStream<E> {
    type Error = Infallible;

    /// Resolve, dial and forward events until the sink is dropped.
    ///
    /// Blocks the calling thread; connection failures never end the loop.
    fn run(&mut self, sink: mpsc::Sender<Trigger>) -> Result<(), Infallible> {
        let mut state = ConnectionState::Connecting;
        while let Some(next) = self.step(state, &sink) {
            state = next;
        }
        Ok(())
    }
}
