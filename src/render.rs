//! Formatting of the gobar workspace line.
//!
//! Pure string building, no I/O.  Each workspace becomes a brace-delimited
//! fragment followed by two spaces; the clock and power status close the
//! line:
//!
//! ```text
//! *{1}  {[2]}  {3}  {AR14:05}
//! ```
//!
//! Colors use gobar's `CF0x<rrggbb>` token right after the opening brace.

use crate::battery::BatteryReading;
use crate::wingo::workspaces::Workspace;
use chrono::NaiveTime;

/// Prefix marking a workspace that hosts client windows.
pub const CLIENT_MARK: &str = "*";

/// Color settings applied to workspace fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorOptions {
    /// Foreground for the current workspace.
    pub highlight: Option<String>,
    /// Foreground for every other workspace.
    pub lowlight: Option<String>,
}

/// The non-workspace part of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ancillary {
    pub time: NaiveTime,
    pub battery: BatteryReading,
}

fn color_token(color: Option<&str>) -> String {
    match color {
        Some(c) if !c.is_empty() => format!("CF0x{}", c),
        _ => String::new(),
    }
}

fn workspace_fragment(ws: &Workspace, colors: &ColorOptions) -> String {
    if ws.is_current {
        format!("{{{}[{}]}}", color_token(colors.highlight.as_deref()), ws.name)
    } else {
        let mark = if ws.has_clients { CLIENT_MARK } else { "" };
        format!(
            "{}{{{}{}}}",
            mark,
            color_token(colors.lowlight.as_deref()),
            ws.name
        )
    }
}

fn ancillary_fragment(anc: &Ancillary) -> String {
    let clock = anc.time.format("%H:%M");
    match anc.battery {
        BatteryReading::NotRequested => format!("{{AR{}}}", clock),
        BatteryReading::Unknown => format!("{{ARwall  {}}}", clock),
        BatteryReading::MinutesLeft(mins) => format!("{{AR{}m  {}}}", mins, clock),
    }
}

/// Render the full line, newline included.
pub fn render(workspaces: &[Workspace], ancillary: &Ancillary, colors: &ColorOptions) -> String {
    let mut line = String::new();
    for ws in workspaces {
        line.push_str(&workspace_fragment(ws, colors));
        line.push_str("  ");
    }
    line.push_str(&ancillary_fragment(ancillary));
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Workspace> {
        vec![
            Workspace::new("1", true, false),
            Workspace::new("2", false, true),
            Workspace::new("3", false, false),
        ]
    }

    fn at(h: u32, m: u32, battery: BatteryReading) -> Ancillary {
        Ancillary {
            time: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
            battery,
        }
    }

    #[test]
    fn plain_line_without_colors() {
        let line = render(
            &sample(),
            &at(14, 5, BatteryReading::NotRequested),
            &ColorOptions::default(),
        );
        assert_eq!(line, "*{1}  {[2]}  {3}  {AR14:05}\n");
    }

    #[test]
    fn colors_are_applied_per_role() {
        let colors = ColorOptions {
            highlight: Some("ffffff".into()),
            lowlight: Some("888888".into()),
        };
        let line = render(&sample(), &at(9, 0, BatteryReading::NotRequested), &colors);
        assert_eq!(
            line,
            "*{CF0x8888881}  {CF0xffffff[2]}  {CF0x8888883}  {AR09:00}\n"
        );
    }

    #[test]
    fn current_workspace_with_clients_has_no_mark() {
        let ws = vec![Workspace::new("web", true, true)];
        let line = render(
            &ws,
            &at(0, 0, BatteryReading::NotRequested),
            &ColorOptions::default(),
        );
        assert_eq!(line, "{[web]}  {AR00:00}\n");
    }

    #[test]
    fn battery_variants() {
        let none: Vec<Workspace> = Vec::new();
        let colors = ColorOptions::default();
        assert_eq!(
            render(&none, &at(23, 59, BatteryReading::Unknown), &colors),
            "{ARwall  23:59}\n"
        );
        assert_eq!(
            render(&none, &at(7, 30, BatteryReading::MinutesLeft(95)), &colors),
            "{AR95m  07:30}\n"
        );
    }

    #[test]
    fn empty_color_string_means_no_color() {
        let colors = ColorOptions {
            highlight: Some(String::new()),
            lowlight: None,
        };
        let line = render(&sample(), &at(1, 2, BatteryReading::NotRequested), &colors);
        assert_eq!(line, "*{1}  {[2]}  {3}  {AR01:02}\n");
    }

    #[test]
    fn rendering_is_deterministic() {
        let anc = at(12, 34, BatteryReading::MinutesLeft(5));
        let colors = ColorOptions {
            highlight: Some("ff0000".into()),
            lowlight: None,
        };
        assert_eq!(
            render(&sample(), &anc, &colors),
            render(&sample(), &anc, &colors)
        );
    }
}
