//! The redraw loop.
//!
//! Two [`TriggerSource`]s, the [`Ticker`] and the
//! [`NotificationStream`](crate::ipc::notify::NotificationStream), run on
//! their own threads and feed a single [`mpsc`] channel.  The [`Scheduler`]
//! drains that channel on one thread and handles each trigger to completion
//! before taking the next, so at most one redraw is ever in flight and the
//! command connection needs no locking.

use crate::battery::BatteryReading;
use crate::ipc::event::NotificationEvent;
use crate::render::{render, Ancillary, ColorOptions};
use crate::traits::{BatteryProbe, CommandTransport, LineSink, TriggerSource};
use crate::wingo::workspaces::capture;
use crate::wingo::REDRAW_EVENTS;
use chrono::{Local, NaiveTime};
use log::{debug, error, info};
use std::convert::Infallible;
use std::sync::mpsc;
use std::time::Duration;

/// Default interval between clock ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Why a redraw may be needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// The periodic timer fired: refresh the power status, then redraw.
    Tick,
    /// A decoded notification; redraws only for [`REDRAW_EVENTS`].
    Notification(NotificationEvent),
}

/// Whether `event` changes the workspace line.
pub fn is_redraw_event(event: &NotificationEvent) -> bool {
    REDRAW_EVENTS.contains(&event.name.as_str())
}

/// A [`TriggerSource`] emitting [`Trigger::Tick`] at a fixed interval.
pub struct Ticker {
    interval: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl TriggerSource for Ticker {
    type Error = Infallible;

    fn run(&mut self, sink: mpsc::Sender<Trigger>) -> Result<(), Infallible> {
        loop {
            std::thread::sleep(self.interval);
            if sink.send(Trigger::Tick).is_err() {
                debug!("sink closed, stopping ticker");
                return Ok(());
            }
        }
    }
}

/// Owns the command connection, the power probe and the output, and turns
/// triggers into rendered lines.
pub struct Scheduler<T: CommandTransport, S: LineSink> {
    conn: T,
    sink: S,
    battery: Box<dyn BatteryProbe + Send>,
    colors: ColorOptions,
    last_battery: BatteryReading,
    clock: Box<dyn Fn() -> NaiveTime + Send>,
}

impl<T: CommandTransport, S: LineSink> Scheduler<T, S> {
    pub fn new(
        conn: T,
        sink: S,
        battery: Box<dyn BatteryProbe + Send>,
        colors: ColorOptions,
    ) -> Self {
        Self {
            conn,
            sink,
            battery,
            colors,
            last_battery: BatteryReading::NotRequested,
            clock: Box::new(|| Local::now().time()),
        }
    }

    /// Replace the wall clock.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveTime + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Handle one trigger to completion.
    ///
    /// Returns the rendered line, or `None` if the trigger was ignored or
    /// the redraw was skipped because of a transport error.
    pub fn handle(&mut self, trigger: Trigger) -> Option<String> {
        match trigger {
            Trigger::Tick => {
                self.last_battery = self.battery.read();
            }
            Trigger::Notification(event) if is_redraw_event(&event) => {
                debug!("redraw for {}", event.name);
            }
            Trigger::Notification(event) => {
                debug!("ignoring {}", event.name);
                return None;
            }
        }
        self.redraw()
    }

    fn redraw(&mut self) -> Option<String> {
        if let Err(e) = self.conn.reconnect() {
            error!("skipping redraw, command socket unavailable: {}", e);
            return None;
        }
        let workspaces = match capture(&mut self.conn) {
            Ok(ws) => ws,
            Err(e) => {
                error!("skipping redraw: {}", e);
                return None;
            }
        };
        let ancillary = Ancillary {
            time: (self.clock)(),
            battery: self.last_battery,
        };
        let line = render(&workspaces, &ancillary, &self.colors);
        if let Err(e) = self.sink.write_line(&line) {
            error!("{}", e);
        }
        Some(line)
    }

    /// Draw once, then handle triggers until every source has hung up.
    pub fn run(&mut self, triggers: mpsc::Receiver<Trigger>) {
        self.handle(Trigger::Tick);
        for trigger in triggers {
            self.handle(trigger);
        }
        info!("all trigger sources closed, exiting");
    }
}
