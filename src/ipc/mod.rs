//! Client side of the window manager's IPC.
//!
//! Both sockets speak the same NUL-delimited framing ([`frame`]).  The
//! command socket is a synchronous request/response channel
//! ([`channel::CommandChannel`]); the notification socket is a one-way
//! stream of JSON events ([`notify::NotificationStream`]).

pub mod channel;
pub mod event;
pub mod frame;
pub mod notify;

/// Errors produced by the command channel.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("command channel is not connected")]
    Disconnected,
    #[error("connection closed before a reply arrived")]
    Closed,
}
