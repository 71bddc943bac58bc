//! Dashboard command - render views and navigate them from the keyboard.
//!
//! Each line read from the input is a command: the first character selects
//! an action (`w`, `m`, `a`, `b`) and `q` quits. Views are re-rendered from a
//! fresh snapshot after every action, so readings submitted from another
//! terminal show up on the next key press.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use farmdash_core::view::render;
use farmdash_core::{Action, Dashboard, View};

use super::CommandContext;
use crate::style;

pub fn cmd_dashboard(
    ctx: &CommandContext,
    dashboard: &Dashboard,
    start: View,
    interactive: bool,
) -> Result<()> {
    let tail_lines = ctx.config.dashboard.tail_lines;
    let no_color = ctx.opts.no_color;

    if interactive {
        let stdin = io::stdin();
        run_views(dashboard, tail_lines, start, stdin.lock(), io::stdout(), no_color)?;
    } else {
        write_view(dashboard, tail_lines, start, &mut io::stdout(), no_color)?;
    }
    Ok(())
}

/// Render `start`, then apply one action per input line until `q` or EOF.
///
/// Returns the view that was showing when the loop ended.
pub fn run_views<R: BufRead, W: Write>(
    dashboard: &Dashboard,
    tail_lines: usize,
    start: View,
    mut input: R,
    mut out: W,
    no_color: bool,
) -> Result<View> {
    let mut view = start;
    write_view(dashboard, tail_lines, view, &mut out, no_color)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let Some(key) = line.trim().chars().next() else {
            continue;
        };
        if key.eq_ignore_ascii_case(&'q') {
            break;
        }

        match Action::from_key(key) {
            Some(action) if view.actions().contains(&action) => {
                view = view.apply(action);
                write_view(dashboard, tail_lines, view, &mut out, no_color)?;
            }
            _ => {
                let offered: Vec<String> = view
                    .actions()
                    .iter()
                    .map(|a| a.key().to_string())
                    .chain(std::iter::once("q".to_string()))
                    .collect();
                writeln!(
                    out,
                    "{}",
                    style::format_warning(
                        &format!("Unknown key '{}'. Try one of: {}", key, offered.join(", ")),
                        no_color
                    )
                )?;
            }
        }
    }

    Ok(view)
}

fn write_view<W: Write>(
    dashboard: &Dashboard,
    tail_lines: usize,
    view: View,
    out: &mut W,
    no_color: bool,
) -> Result<()> {
    let snapshot = dashboard.snapshot(tail_lines)?;
    let mut lines = render(view, &snapshot).into_iter();

    if let Some(title) = lines.next() {
        writeln!(out, "{}", style::format_title(&title, no_color))?;
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmdash_core::{AnimalSelection, AuditLog, Measurement, Store, Thresholds};
    use farmdash_types::Animal;

    fn dashboard(dir: &std::path::Path) -> Dashboard {
        Dashboard::new(
            Store::open_in_memory().unwrap(),
            AuditLog::new(dir.join("events.log")),
            AnimalSelection::new(dir.join("animal.txt")),
            Thresholds::default(),
        )
    }

    fn run(dashboard: &Dashboard, keys: &str) -> (View, String) {
        let mut out = Vec::new();
        let view = run_views(dashboard, 5, View::Home, keys.as_bytes(), &mut out, true).unwrap();
        (view, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_navigate_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = dashboard(dir.path());
        dashboard.submit(Measurement::new(22.0, 20.0, 6.5)).unwrap();

        let (view, out) = run(&dashboard, "m\nb\nw\nq\n");

        assert_eq!(view, View::Weather);
        assert!(out.contains("Status: Dry: irrigation needed"));
        assert!(out.contains("Temperature: 22 °C"));
    }

    #[test]
    fn test_eof_ends_loop() {
        let dir = tempfile::tempdir().unwrap();
        let (view, out) = run(&dashboard(dir.path()), "a\n");

        assert_eq!(view, View::Animals);
        assert!(out.contains("No animal detected"));
    }

    #[test]
    fn test_action_not_offered_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = dashboard(dir.path());
        dashboard.animal().set(Animal::Boar).unwrap();

        let (view, out) = run(&dashboard, "a\nw\nx\n\nq\n");

        assert_eq!(view, View::Animals);
        assert!(out.contains("Detected animal: Boar"));
        assert!(out.contains("Unknown key 'w'. Try one of: b, q"));
        assert!(out.contains("Unknown key 'x'"));
    }

    #[test]
    fn test_home_lists_recent_events() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = dashboard(dir.path());
        dashboard.simulate_event().unwrap();

        let (_, out) = run(&dashboard, "q\n");
        assert!(out.starts_with("Farm Dashboard"));
        assert!(out.contains("Recent events:"));
        assert!(out.contains("- Simulated sensor event"));
    }
}
