//! Entry point for **wingobar**.
//!
//! Resolves Wingo's sockets, spawns the ticker and the notification stream
//! on background threads and runs the redraw loop on the main thread.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;
use wingobar::battery::{ApmProbe, NoBattery};
use wingobar::cli::Args;
use wingobar::config::Config;
use wingobar::ipc::channel::CommandChannel;
use wingobar::ipc::notify::NotificationStream;
use wingobar::output::Output;
use wingobar::scheduler::{Scheduler, Ticker, Trigger};
use wingobar::traits::{BatteryProbe, TriggerSource};
use wingobar::wingo::resolve::{Resolver, SocketKind, SystemEnvironment};

/// Resolve the default config path (`$XDG_CONFIG_HOME/wingobar/config.json`).
fn default_config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("wingobar").join("config.json")
}

/// Load the config file named on the command line, or the default one,
/// falling back to compiled-in defaults when the default file is absent.
fn load_config(explicit: Option<&PathBuf>) -> Config {
    if let Some(path) = explicit {
        match Config::load(path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }
    let path = default_config_path();
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref());
    let config = args.apply(config);

    let resolver = Resolver::new(SystemEnvironment);
    let command_path = match resolver.resolve(SocketKind::Command) {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let conn = match CommandChannel::connect(&command_path) {
        Ok(c) => c,
        Err(e) => {
            error!("could not connect to Wingo IPC at {}: {}", command_path.display(), e);
            std::process::exit(1);
        }
    };

    let (tx, rx) = mpsc::channel::<Trigger>();
    spawn_trigger_sources(&config, tx);

    let battery: Box<dyn BatteryProbe + Send> = if config.battery {
        Box::new(ApmProbe)
    } else {
        Box::new(NoBattery)
    };
    let output = Output::from_path(config.output.as_deref());
    let mut scheduler = Scheduler::new(conn, output, battery, config.colors());

    info!("wingobar running");
    scheduler.run(rx);
}

//  Helpers

fn spawn_trigger_sources(config: &Config, tx: mpsc::Sender<Trigger>) {
    {
        let tx = tx.clone();
        let interval = config.tick_interval();
        std::thread::spawn(move || {
            let _ = Ticker::new(interval).run(tx);
        });
    }

    // The stream locates its socket on its own thread, before every dial.
    {
        let retry = config.reconnect_interval();
        std::thread::spawn(move || {
            let mut stream =
                NotificationStream::new(Resolver::new(SystemEnvironment)).with_retry_interval(retry);
            let _ = stream.run(tx);
        });
    }
}
