//! Wingo-specific pieces: where its sockets live and which commands
//! describe the workspace state.
//!
//! Nothing outside this module should reference Wingo directly.

pub mod resolve;
pub mod workspaces;

/// Events that change what the workspace line shows.
pub const REDRAW_EVENTS: &[&str] = &["ChangedWorkspace", "ManagedClient", "UnmanagedClient"];
