//! CLI command implementations

use crate::output::{to_json, to_table, OutputFormat};
use crate::trace::{self, ReplayReport, Trace};
use anyhow::Context;
use kino_gesture::{math, DoubleTapAction, GestureConfig};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;
use tracing::warn;

/// Load tunables, falling back to defaults.
///
/// In strict mode an out-of-range value is an error; otherwise it is
/// reported and clamped.
pub fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<GestureConfig> {
    let Some(path) = path else {
        return Ok(GestureConfig::default());
    };

    if strict {
        return GestureConfig::from_file(path)
            .with_context(|| format!("loading tunables from {}", path.display()));
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading tunables from {}", path.display()))?;
    let config: GestureConfig = serde_json::from_str(&json)
        .with_context(|| format!("parsing tunables from {}", path.display()))?;

    if let Err(e) = config.validate() {
        warn!(error = %e, code = e.error_code(), "Tunables out of range, clamping");
    }
    Ok(config.sanitized())
}

/// Replay a touch trace
pub fn replay(trace_path: &Path, config: GestureConfig, format: &str) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(trace_path)
        .with_context(|| format!("reading trace {}", trace_path.display()))?;
    let trace: Trace = serde_json::from_str(&json)
        .with_context(|| format!("parsing trace {}", trace_path.display()))?;

    let report = trace::replay(trace, config);

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Table => println!("{}", to_table(&step_rows(&report))),
        OutputFormat::Text => print_replay(&report),
    }

    Ok(())
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "t (ms)")]
    t: u64,
    input: &'static str,
    result: String,
    phase: String,
    events: usize,
}

fn step_rows(report: &ReplayReport) -> Vec<StepRow> {
    report
        .steps
        .iter()
        .map(|step| StepRow {
            t: step.t,
            input: step.input,
            result: step_result(step),
            phase: step.phase.to_string(),
            events: step.events.len(),
        })
        .collect()
}

fn step_result(step: &trace::ReplayStep) -> String {
    match (step.disposition, step.click_suppressed) {
        (Some(d), _) if d.is_consumed() => "consumed".to_string(),
        (Some(_), _) => "pass-through".to_string(),
        (None, Some(true)) => "click suppressed".to_string(),
        (None, Some(false)) => "click allowed".to_string(),
        (None, None) => "-".to_string(),
    }
}

fn print_replay(report: &ReplayReport) {
    println!("Replay:");
    for step in &report.steps {
        println!(
            "  {:>6}ms  {:<20} {:<16} -> {}",
            step.t,
            step.input,
            step_result(step),
            step.phase
        );
        for event in &step.events {
            println!("            {:?}", event);
        }
    }

    let player = &report.player;
    println!("\nFinal state:");
    println!("  Phase: {}", report.final_phase);
    println!("  Position: {:.2}s", player.current_time);
    println!("  Volume: {:.2}{}", player.volume, if player.muted { " (muted)" } else { "" });
    println!("  Rate: {:.2}x", player.playback_rate);
    println!("  Playing: {}", player.playing);
    if report.final_phase.is_tracking() {
        println!("  Note: trace ends with a gesture still in progress");
    }
}

#[derive(Debug, Serialize, Tabled)]
struct ZoneRow {
    x: f64,
    double_tap: DoubleTapAction,
    volume_zone: bool,
}

/// Classify positions into double-tap and volume zones
pub fn zones(width: f64, xs: &[f64], config: &GestureConfig, format: &str) -> anyhow::Result<()> {
    let xs: Vec<f64> = if xs.is_empty() {
        vec![0.0, width / 6.0, width / 2.0, width * 5.0 / 6.0, width]
    } else {
        xs.to_vec()
    };

    let rows: Vec<ZoneRow> = xs
        .into_iter()
        .map(|x| ZoneRow {
            x,
            double_tap: math::resolve_double_tap_action(x, width, config.double_tap_side_zone_ratio),
            volume_zone: math::is_in_volume_zone(x, width, config.volume_side_zone_ratio),
        })
        .collect();

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&rows)?),
        OutputFormat::Table => println!("{}", to_table(&rows)),
        OutputFormat::Text => {
            println!("Zones for width {}px:", width);
            println!(
                "  Double tap: backward <= {:.1}px, forward >= {:.1}px",
                width * config.double_tap_side_zone_ratio,
                width * (1.0 - config.double_tap_side_zone_ratio)
            );
            println!(
                "  Volume:     left <= {:.1}px, right >= {:.1}px",
                width * config.volume_side_zone_ratio,
                width * (1.0 - config.volume_side_zone_ratio)
            );
            println!();
            for row in &rows {
                println!(
                    "  x={:<8.1} double tap: {:<9} volume zone: {}",
                    row.x,
                    row.double_tap.to_string(),
                    row.volume_zone
                );
            }
        }
    }

    Ok(())
}

/// Print the effective tunables
pub fn config(config: &GestureConfig, format: &str) -> anyhow::Result<()> {
    match OutputFormat::from(format) {
        OutputFormat::Text => {
            println!("Effective tunables:");
            if let serde_json::Value::Object(fields) = serde_json::to_value(config)? {
                for (name, value) in fields {
                    println!("  {}: {}", name, value);
                }
            }
        }
        OutputFormat::Json | OutputFormat::Table => println!("{}", to_json(config)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(json: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "kino-gesture-cli-{}-{}.json",
            std::process::id(),
            json.len()
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_config_defaults_without_path() {
        assert_eq!(load_config(None, true).unwrap(), GestureConfig::default());
    }

    #[test]
    fn test_load_config_strict_rejects_out_of_range() {
        let path = write_config(r#"{ "long_press_rate": 64.0 }"#);
        let lenient = load_config(Some(&path), false).unwrap();
        let strict = load_config(Some(&path), true);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(lenient.long_press_rate, 16.0);
        let err = strict.unwrap_err();
        assert!(format!("{:#}", err).contains("long_press_rate"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let path = std::env::temp_dir().join("kino-gesture-cli-missing.json");
        assert!(load_config(Some(&path), true).is_err());
        assert!(load_config(Some(&path), false).is_err());
    }
}
