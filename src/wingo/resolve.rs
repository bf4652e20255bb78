//! Locating Wingo's command and notification sockets.
//!
//! Strategies, first success wins:
//!
//! 1. `$WINGO_SOCKET` / `$WINGO_NOTIFY_SOCKET`, used verbatim (trimmed).
//! 2. `wingo --show-socket` / `wingo --show-notify-socket`, retried with a
//!    linear [`Backoff`] until the next delay would exceed the cap.
//! 3. `$XDG_RUNTIME_DIR/wingo/$DISPLAY.0` (plus `-notify` for the
//!    notification socket), when both variables are non-empty.

use crate::traits::Environment;
use log::{debug, info, warn};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

const WM_NAME: &str = "wingo";

/// First backoff delay, in milliseconds.
pub const BACKOFF_START_MS: u64 = 1;
/// Increment per attempt, in milliseconds.
pub const BACKOFF_STEP_MS: u64 = 100;
/// Largest delay that is still waited out, in milliseconds.
pub const BACKOFF_CAP_MS: u64 = 2000;

/// Which of the two sockets to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    Command,
    Notification,
}

impl SocketKind {
    fn env_var(self) -> &'static str {
        match self {
            SocketKind::Command => "WINGO_SOCKET",
            SocketKind::Notification => "WINGO_NOTIFY_SOCKET",
        }
    }

    fn query_flag(self) -> &'static str {
        match self {
            SocketKind::Command => "--show-socket",
            SocketKind::Notification => "--show-notify-socket",
        }
    }

    fn file_suffix(self) -> &'static str {
        match self {
            SocketKind::Command => "",
            SocketKind::Notification => "-notify",
        }
    }
}

impl fmt::Display for SocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketKind::Command => f.write_str("command"),
            SocketKind::Notification => f.write_str("notification"),
        }
    }
}

/// Every strategy failed.
#[derive(Debug, thiserror::Error)]
#[error("cannot locate the wingo {kind} socket")]
pub struct ResolveError {
    pub kind: SocketKind,
}

/// Linearly increasing retry delays: 1, 101, 201, … ms, ending before the
/// first delay above [`BACKOFF_CAP_MS`].
#[derive(Debug, Clone)]
pub struct Backoff {
    next_ms: u64,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            next_ms: BACKOFF_START_MS,
        }
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.next_ms > BACKOFF_CAP_MS {
            return None;
        }
        let delay = self.next_ms;
        self.next_ms = self.next_ms.saturating_add(BACKOFF_STEP_MS);
        Some(Duration::from_millis(delay))
    }
}

/// Resolves socket paths against an [`Environment`].
pub struct Resolver<E: Environment> {
    env: E,
}

impl<E: Environment> Resolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Locate the socket of the given kind.
    pub fn resolve(&self, kind: SocketKind) -> Result<PathBuf, ResolveError> {
        if let Some(path) = self.from_env(kind) {
            info!("{} socket from ${}: {}", kind, kind.env_var(), path.display());
            return Ok(path);
        }
        if let Some(path) = self.from_query(kind) {
            info!("{} socket from `{} {}`: {}", kind, WM_NAME, kind.query_flag(), path.display());
            return Ok(path);
        }
        if let Some(path) = self.derived(kind) {
            info!("{} socket derived: {}", kind, path.display());
            return Ok(path);
        }
        Err(ResolveError { kind })
    }

    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.env
            .var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn from_env(&self, kind: SocketKind) -> Option<PathBuf> {
        self.non_empty_var(kind.env_var()).map(PathBuf::from)
    }

    fn from_query(&self, kind: SocketKind) -> Option<PathBuf> {
        let mut delays = Backoff::default();
        loop {
            match self.env.query(WM_NAME, &[kind.query_flag()]) {
                Ok(out) if !out.trim().is_empty() => return Some(PathBuf::from(out.trim())),
                Ok(_) => debug!("`{} {}` printed nothing", WM_NAME, kind.query_flag()),
                Err(e) => debug!("`{} {}` failed: {}", WM_NAME, kind.query_flag(), e),
            }
            match delays.next() {
                Some(delay) => self.env.sleep(delay),
                None => {
                    warn!("giving up on `{} {}`", WM_NAME, kind.query_flag());
                    return None;
                }
            }
        }
    }

    fn derived(&self, kind: SocketKind) -> Option<PathBuf> {
        let runtime_dir = self.non_empty_var("XDG_RUNTIME_DIR")?;
        let display = self.non_empty_var("DISPLAY")?;
        Some(PathBuf::from(format!(
            "{}/{}/{}.0{}",
            runtime_dir,
            WM_NAME,
            display,
            kind.file_suffix()
        )))
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn query(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{} exited with {}",
                program, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
