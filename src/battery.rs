//! Power status shown next to the clock.

use crate::traits::BatteryProbe;
use log::debug;
use std::process::Command;

/// What the ancillary fragment knows about power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryReading {
    /// Battery info was not requested; only the clock is shown.
    NotRequested,
    /// On wall power, or the state could not be read.
    Unknown,
    /// Running on battery with this many minutes left.
    MinutesLeft(u32),
}

/// Interpret the output of `apm -m`.
///
/// `unknown` and negative values mean wall power; some kernels report the
/// wall sentinel as a huge unsigned value, which reads back negative here.
pub fn parse_apm_minutes(output: &str) -> BatteryReading {
    let trimmed = output.trim();
    if trimmed == "unknown" {
        return BatteryReading::Unknown;
    }
    match trimmed.parse::<i64>() {
        Ok(mins) if mins < 0 => BatteryReading::Unknown,
        Ok(mins) if mins > i64::from(i32::MAX) => BatteryReading::Unknown,
        Ok(mins) => BatteryReading::MinutesLeft(mins as u32),
        Err(_) => BatteryReading::Unknown,
    }
}

/// [`BatteryProbe`] that shells out to `apm -m`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApmProbe;

impl BatteryProbe for ApmProbe {
    fn read(&self) -> BatteryReading {
        match Command::new("apm").arg("-m").output() {
            Ok(out) if out.status.success() => {
                parse_apm_minutes(&String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                debug!("apm exited with {}", out.status);
                BatteryReading::Unknown
            }
            Err(e) => {
                debug!("apm unavailable: {}", e);
                BatteryReading::Unknown
            }
        }
    }
}

/// [`BatteryProbe`] used when battery info is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBattery;

impl BatteryProbe for NoBattery {
    fn read(&self) -> BatteryReading {
        BatteryReading::NotRequested
    }
}
