//! Request/response transport over the command socket.
//!
//! A single connection is opened once and reused for every command.  Each
//! [`send`](CommandTransport::send) writes one frame and blocks for exactly
//! one reply frame; there is no pipelining and no internal retry.

use super::frame::{read_frame, write_frame};
use super::IpcError;
use crate::traits::CommandTransport;
use log::{debug, info, warn};
use std::io::BufReader;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

/// Persistent connection to the command socket.
///
/// After a failed round trip the stream is dropped and every further send
/// fails with [`IpcError::Disconnected`] until
/// [`reconnect`](CommandTransport::reconnect) succeeds.
pub struct CommandChannel {
    path: PathBuf,
    stream: Option<BufReader<UnixStream>>,
}

impl CommandChannel {
    /// Dial `path`.  Fails if the socket cannot be reached.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self, IpcError> {
        let path = path.as_ref().to_path_buf();
        let stream = UnixStream::connect(&path)?;
        info!("command channel connected to {}", path.display());
        Ok(Self {
            path,
            stream: Some(BufReader::new(stream)),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn round_trip(stream: &mut BufReader<UnixStream>, command: &str) -> Result<String, IpcError> {
        write_frame(stream.get_mut(), command)?;
        read_frame(stream)?.ok_or(IpcError::Closed)
    }
}

impl CommandTransport for CommandChannel {
    type Error = IpcError;

    fn send(&mut self, command: &str) -> Result<String, IpcError> {
        let stream = self.stream.as_mut().ok_or(IpcError::Disconnected)?;
        debug!("-> {}", command);
        match Self::round_trip(stream, command) {
            Ok(reply) => {
                debug!("<- {:?}", reply);
                Ok(reply)
            }
            Err(e) => {
                warn!("command {:?} failed, dropping connection: {}", command, e);
                self.stream = None;
                Err(e)
            }
        }
    }

    /// Redial the socket if the previous connection was dropped.
    ///
    /// A no-op while still connected.
    fn reconnect(&mut self) -> Result<(), IpcError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let stream = UnixStream::connect(&self.path)?;
        info!("command channel reconnected to {}", self.path.display());
        self.stream = Some(BufReader::new(stream));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::test_support::tmp_socket_path;
    use std::io::Write;
    use std::os::unix::net::UnixListener;

    /// Serve one connection, answering each command via `reply`, until the
    /// client hangs up.
    fn serve_once(listener: UnixListener, reply: fn(&str) -> String) {
        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            while let Ok(Some(cmd)) = read_frame(&mut reader) {
                write_frame(reader.get_mut(), &reply(&cmd)).unwrap();
            }
        });
    }

    #[test]
    fn send_returns_trimmed_reply_without_terminator() {
        let path = tmp_socket_path();
        let listener = UnixListener::bind(&path).unwrap();
        serve_once(listener, |cmd| match cmd {
            "GetWorkspace" => " 2\n".into(),
            "GetWorkspaceList" => "1\n2\n3\n".into(),
            _ => "".into(),
        });

        let mut chan = CommandChannel::connect(&path).unwrap();
        assert_eq!(chan.send("GetWorkspace").unwrap(), "2");
        assert_eq!(chan.send("GetWorkspaceList").unwrap(), "1\n2\n3");
        assert_eq!(chan.send("GetClientList \"1\"").unwrap(), "");
        assert!(chan.is_connected());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn connect_fails_without_a_server() {
        let path = tmp_socket_path();
        assert!(CommandChannel::connect(&path).is_err());
    }

    #[test]
    fn closed_server_disconnects_and_fails_fast() {
        let path = tmp_socket_path();
        let listener = UnixListener::bind(&path).unwrap();
        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });

        let mut chan = CommandChannel::connect(&path).unwrap();
        assert!(chan.send("GetWorkspace").is_err());
        assert!(!chan.is_connected());
        assert!(matches!(
            chan.send("GetWorkspace"),
            Err(IpcError::Disconnected)
        ));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn reconnect_picks_up_a_new_server() {
        let path = tmp_socket_path();
        let listener = UnixListener::bind(&path).unwrap();
        std::thread::spawn(move || {
            // First connection is dropped immediately, second one answers.
            let (first, _) = listener.accept().unwrap();
            drop(first);
            let (second, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(second);
            while let Ok(Some(_)) = read_frame(&mut reader) {
                reader.get_mut().write_all(b"ok\0").unwrap();
            }
        });

        let mut chan = CommandChannel::connect(&path).unwrap();
        assert!(chan.send("GetWorkspace").is_err());
        chan.reconnect().unwrap();
        assert_eq!(chan.send("GetWorkspace").unwrap(), "ok");

        let _ = std::fs::remove_file(&path);
    }
}
