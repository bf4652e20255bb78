//! Core traits that decouple the scheduler from any specific transport,
//! power backend or output target.
//!
//! Every concrete backend (the Wingo command socket, `apm`, a file, a test
//! harness, …) implements one of these traits.  The
//! [`Scheduler`](crate::scheduler::Scheduler) only depends on these
//! abstractions.

use crate::battery::BatteryReading;
use crate::scheduler::Trigger;
use std::io;
use std::sync::mpsc;
use std::time::Duration;

/// A synchronous request/response channel to the window manager.
///
/// Implementations complete one command fully (write, then blocking read)
/// before the next one may begin.
pub trait CommandTransport {
    /// The error type produced by this transport.
    type Error: std::error::Error + Send + 'static;

    /// Send `command` and return the trimmed reply payload.
    fn send(&mut self, command: &str) -> Result<String, Self::Error>;

    /// Re-establish a dropped connection before the next batch of commands.
    ///
    /// Transports without connection state keep the default no-op.
    fn reconnect(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A source of [`Trigger`]s.
///
/// # Contract
///
/// * [`run`](TriggerSource::run) **blocks** until the sink is dropped or an
///   unrecoverable error occurs.
/// * Each trigger must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait TriggerSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Produce triggers into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Trigger>) -> Result<(), Self::Error>;
}

/// Reads the current power state.
///
/// Never fails: any backend error degrades to [`BatteryReading::Unknown`].
pub trait BatteryProbe {
    fn read(&self) -> BatteryReading;
}

/// Destination for rendered lines.
pub trait LineSink {
    type Error: std::error::Error + Send + 'static;

    /// Emit one complete, newline-terminated line.
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

/// The process environment as seen by socket path resolution.
pub trait Environment {
    /// Value of an environment variable, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Run `program` with `args` and return its standard output.
    ///
    /// A non-zero exit status is an error.
    fn query(&self, program: &str, args: &[&str]) -> io::Result<String>;

    /// Block the current thread for `duration`.
    fn sleep(&self, duration: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::event::NotificationEvent;

    /// A test double that emits a fixed sequence of triggers.
    struct MockSource {
        triggers: Vec<Trigger>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl TriggerSource for MockSource {
        type Error = MockError;

        fn run(&mut self, sink: mpsc::Sender<Trigger>) -> Result<(), MockError> {
            for trigger in self.triggers.drain(..) {
                let _ = sink.send(trigger);
            }
            Ok(())
        }
    }

    #[test]
    fn mock_source_emits_triggers_in_order() {
        let mut src = MockSource {
            triggers: vec![
                Trigger::Tick,
                Trigger::Notification(NotificationEvent::new("ChangedWorkspace")),
            ],
        };
        let (tx, rx) = mpsc::channel();
        src.run(tx).unwrap();
        let got: Vec<Trigger> = rx.try_iter().collect();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], Trigger::Tick);
        assert_eq!(
            got[1],
            Trigger::Notification(NotificationEvent::new("ChangedWorkspace"))
        );
    }
}
