//! **wingobar** — a live workspace line for the Wingo window manager.
//!
//! Wingo exposes two Unix sockets: a command socket answering one reply per
//! request, and a notification socket streaming JSON events.  wingobar keeps
//! one connection to each, and every time the workspace state changes (or a
//! minute passes) it writes a fresh gobar-formatted line.
//!
//! # Architecture
//!
//! The crate is organised around a few small traits in [`traits`]:
//!
//! * [`traits::CommandTransport`] — request/response access to the window
//!   manager, implemented by [`ipc::channel::CommandChannel`].
//! * [`traits::TriggerSource`] — anything that wakes the redraw loop: the
//!   clock ([`scheduler::Ticker`]) and the event stream
//!   ([`ipc::notify::NotificationStream`]).
//! * [`traits::BatteryProbe`] and [`traits::LineSink`] — the power status
//!   and the output target.
//!
//! The [`scheduler::Scheduler`] consumes all triggers on one thread, so
//! redraws never overlap.  Formatting lives in [`render`].

pub mod battery;
pub mod cli;
pub mod config;
pub mod ipc;
pub mod output;
pub mod render;
pub mod scheduler;
pub mod traits;
pub mod wingo;
