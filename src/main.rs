//! droopwatch CLI
//!
//! Usage:
//!   droopwatch --simulate                      # Synthetic demo feed
//!   droopwatch --simulate --droop-at 120       # Droop onset at frame 120
//!   droopwatch --replay session.jsonl          # Replay a recorded session
//!   droopwatch                                 # Interactive: frame records on stdin
//!   droopwatch --replay session.jsonl --json   # JSON output per frame

use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use std::io::{self, BufRead, Write};

use droopwatch::core::{
    load_baseline, save_baseline, AsymmetryDetector, FrameRecord, LandmarkSource, MonitorSession,
    ReplaySource, SyntheticSource,
};
use droopwatch::types::{DetectorConfig, FrameResult, FrameStatus};
use droopwatch::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "droopwatch",
    version = VERSION,
    about = "Streaming facial-asymmetry detector with per-subject baseline calibration",
    long_about = "droopwatch watches a stream of facial landmarks for one-sided mouth droop,\n\
                  a visible proxy for facial asymmetry onset.\n\n\
                  It first calibrates a personal baseline (everyone's face is a little\n\
                  asymmetric), then compares a short recent window against it. A deviation\n\
                  must persist before the alert latches; once latched it never clears on\n\
                  its own.\n\n\
                  Modes:\n  \
                  --simulate      Synthetic feed, optionally with a scripted droop onset\n  \
                  --replay FILE   Replay recorded frame records (JSONL)\n  \
                  (default)       Interactive: one JSON frame record per stdin line\n\n\
                  Statuses:\n  \
                  NO_VIDEO     - Source not ready\n  \
                  NO_FACE      - No face in frame\n  \
                  CALIBRATING  - Collecting the baseline\n  \
                  OK           - Monitoring, within normal range\n  \
                  ALERT        - Sustained asymmetry deviation (latched)"
)]
struct Args {
    /// Replay a recorded session (one JSON frame record per line)
    #[arg(short, long)]
    replay: Option<String>,

    /// Run a synthetic demo feed
    #[arg(short, long)]
    simulate: bool,

    /// Total frames for the synthetic feed
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Synthetic feed: frame at which the right mouth corner starts to droop
    #[arg(long)]
    droop_at: Option<u64>,

    /// Synthetic feed: droop magnitude in normalized coordinates
    #[arg(long, default_value_t = 0.03)]
    droop: f64,

    /// Load a saved baseline and skip calibration
    #[arg(short, long)]
    baseline: Option<String>,

    /// Save the baseline to this file once calibration completes
    #[arg(long)]
    save_baseline: Option<String>,

    /// Strict preset: latch sooner, on smaller deviations
    #[arg(long)]
    strict: bool,

    /// Relaxed preset: require a longer, larger deviation
    #[arg(long)]
    relaxed: bool,

    /// Override the baseline length (frames)
    #[arg(long)]
    baseline_frames: Option<usize>,

    /// Override the recent window length (frames)
    #[arg(long)]
    recent_frames: Option<usize>,

    /// Override the persistence requirement (frames)
    #[arg(long)]
    persist_frames: Option<u32>,

    /// Override the minimum deviation threshold
    #[arg(long)]
    threshold_floor: Option<f64>,

    /// Override the drift stability divisor
    #[arg(long)]
    drift_stability_divisor: Option<f64>,

    /// Output one JSON object per frame
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print every frame, not just status changes
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    env_logger::init_from_env(Env::new().default_filter_or(log_filter(args.verbose)));

    if args.no_color {
        colored::control::set_override(false);
    }

    let detector = match build_detector(&args) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    if args.simulate {
        run_simulate(detector, &args);
    } else if let Some(ref path) = args.replay {
        run_replay(detector, path, &args);
    } else {
        run_interactive(detector, &args);
    }
}

/// Log filter default: state edges at `info`, per-frame detail at `debug`
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Build the detector from presets, overrides, and an optional saved baseline
fn build_detector(args: &Args) -> Result<AsymmetryDetector, droopwatch::types::DetectorError> {
    let mut config = if args.strict {
        DetectorConfig::strict()
    } else if args.relaxed {
        DetectorConfig::relaxed()
    } else {
        DetectorConfig::default()
    };

    if let Some(frames) = args.baseline_frames {
        config.baseline_frames = frames;
    }
    if let Some(frames) = args.recent_frames {
        config.recent_frames = frames;
    }
    if let Some(frames) = args.persist_frames {
        config.persist_frames = frames;
    }
    if let Some(floor) = args.threshold_floor {
        config.threshold_floor = floor;
    }
    if let Some(divisor) = args.drift_stability_divisor {
        config.drift_stability_divisor = divisor;
    }

    let mut detector = AsymmetryDetector::with_config(config)?;

    if let Some(ref path) = args.baseline {
        let snapshot = load_baseline(path)?;
        detector.load_baseline(&snapshot)?;
    }
    Ok(detector)
}

/// Run a synthetic feed end to end
fn run_simulate(detector: AsymmetryDetector, args: &Args) {
    let mut source = SyntheticSource::new(args.frames);
    if let Some(at) = args.droop_at {
        source = source.with_droop(at, args.droop);
    }

    print_header("Simulation", args);
    if let Some(at) = args.droop_at {
        println!(
            "Feeding {} synthetic frames, droop {} from frame {}.",
            args.frames, args.droop, at
        );
    } else {
        println!("Feeding {} clean synthetic frames.", args.frames);
    }
    println!();

    run_session(detector, source, args);
}

/// Replay a recorded session from a JSONL file
fn run_replay(detector: AsymmetryDetector, path: &str, args: &Args) {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{} cannot open {}: {}", "error:".red().bold(), path, e);
            std::process::exit(1);
        }
    };
    let source = match ReplaySource::from_jsonl(io::BufReader::new(file)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} cannot parse {}: {}", "error:".red().bold(), path, e);
            std::process::exit(1);
        }
    };

    print_header("Replay", args);
    println!("Replaying {}", path);
    println!();

    run_session(detector, source, args);
}

/// Drive a session to exhaustion, printing as configured
fn run_session<S: LandmarkSource>(detector: AsymmetryDetector, source: S, args: &Args) {
    let mut session = MonitorSession::new(source, detector);
    let mut last_status: Option<FrameStatus> = None;
    let mut frames: u64 = 0;
    let mut first_alert_ms: Option<f64> = None;

    loop {
        let result = match session.advance() {
            Ok(Some(result)) => result,
            Ok(None) => break,
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        };
        frames += 1;

        let status = result.status();
        let status_changed = last_status != Some(status);

        if args.json {
            println!("{}", result.to_json().unwrap());
        } else if args.verbose || status_changed {
            print_result(&result, args);
        }

        if !args.json && status_changed && status == FrameStatus::Alert {
            print_alert_banner(&result);
        }
        if first_alert_ms.is_none() {
            if let FrameResult::Alert(r) = result {
                first_alert_ms = Some(r.timestamp_ms);
            }
        }

        last_status = Some(status);
    }

    let detector = session.into_detector();
    maybe_save_baseline(&detector, args);
    if !args.json {
        print_summary(&detector, frames, first_alert_ms);
    }
}

/// Interactive mode: one JSON frame record per stdin line
///
/// Bad lines are reported and skipped; the detector state is untouched, so
/// a glitchy feed does not end the session.
fn run_interactive(mut detector: AsymmetryDetector, args: &Args) {
    print_header("Interactive", args);
    println!("Paste one JSON frame record per line, for example:");
    println!("  {{\"timestamp_ms\":0,\"kind\":\"no_face\"}}");
    println!("  {{\"timestamp_ms\":33,\"kind\":\"face\",\"eye_left\":{{\"x\":0.6,\"y\":0.4}},...}}");
    println!("Commands: 'reset' to recalibrate, 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut frames: u64 = 0;
    let mut first_alert_ms: Option<f64> = None;

    loop {
        print!("{}", format_prompt(&detector, args.no_color));
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.eq_ignore_ascii_case("reset") {
            detector.reset();
            println!("{}", "Recalibrating from scratch.".cyan());
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let record: FrameRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                println!("{} {}", "⚠ bad frame record:".yellow(), e);
                continue;
            }
        };

        let result = match detector.process_frame(record.input, record.timestamp_ms) {
            Ok(result) => result,
            Err(e) => {
                println!("{} {}", "⚠ frame rejected:".yellow(), e);
                continue;
            }
        };
        frames += 1;

        if args.json {
            println!("{}", result.to_json().unwrap());
        } else {
            print_result(&result, args);
            if result.is_alert() && first_alert_ms.is_none() {
                print_alert_banner(&result);
            }
        }
        if first_alert_ms.is_none() {
            if let FrameResult::Alert(r) = result {
                first_alert_ms = Some(r.timestamp_ms);
            }
        }
    }

    maybe_save_baseline(&detector, args);
    if !args.json {
        print_summary(&detector, frames, first_alert_ms);
    }
}

/// Save the baseline if requested and calibration finished
fn maybe_save_baseline(detector: &AsymmetryDetector, args: &Args) {
    let Some(ref path) = args.save_baseline else {
        return;
    };
    match detector.baseline_snapshot() {
        Ok(snapshot) => match save_baseline(&snapshot, path) {
            Ok(()) => println!("{} {}", "Baseline saved to".green(), path),
            Err(e) => eprintln!("{} {}", "⚠ baseline save failed:".yellow(), e),
        },
        Err(e) => eprintln!("{} {}", "⚠ baseline not saved:".yellow(), e),
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_header(mode: &str, args: &Args) {
    if args.no_color {
        println!("========================================");
        println!("  droopwatch v{} - {}", VERSION, mode);
        println!("========================================");
    } else {
        println!("{}", "========================================".bold());
        println!("{}", format!("  droopwatch v{} - {}", VERSION, mode).bold());
        println!("{}", "========================================".bold());
    }
    println!();
}

fn format_prompt(detector: &AsymmetryDetector, no_color: bool) -> String {
    let phase = detector.phase();
    if no_color {
        format!("[{}] > ", phase)
    } else if detector.is_alerted() {
        format!("\x1b[31m🔴 [{}]\x1b[0m > ", phase)
    } else {
        format!("\x1b[36m[{}]\x1b[0m > ", phase)
    }
}

fn print_result(result: &FrameResult, args: &Args) {
    if args.no_color {
        println!("{}", result.to_parseable_string());
    } else {
        println!("{}", result.to_terminal_string());
    }
    if args.verbose {
        if let Some(skew) = result.skew() {
            println!("    {}", skew.to_breakdown_string());
        }
        if let Some(r) = result.reading() {
            println!(
                "    recent {:+.4} | baseline {:+.4} | delta {:.4}/{:.4} | persist {}",
                r.recent_mean, r.baseline_mean, r.delta, r.threshold, r.persist_count
            );
        }
    }
}

fn print_alert_banner(result: &FrameResult) {
    let Some(r) = result.reading() else {
        return;
    };
    println!();
    println!("{}", "=================================================".red().bold());
    println!(
        "{}",
        format!(
            "  ASYMMETRY ALERT at {:.0} ms: delta {:.4} over threshold {:.4}",
            r.timestamp_ms, r.delta, r.threshold
        )
        .red()
        .bold()
    );
    println!("{}", "  Sustained one-sided change. Seek evaluation.".red());
    println!("{}", "=================================================".red().bold());
    println!();
}

fn print_summary(detector: &AsymmetryDetector, frames: u64, first_alert_ms: Option<f64>) {
    println!();
    println!("Session over: {} frames processed.", frames);
    match first_alert_ms {
        Some(ms) => println!(
            "{}",
            format!("Alert latched at {:.0} ms and did not clear.", ms).red()
        ),
        None if detector.is_calibrated() => {
            println!("{}", "No sustained asymmetry detected.".green())
        }
        None => println!(
            "Calibration incomplete ({:.0}%).",
            detector.calibration_progress() * 100.0
        ),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tunable_has_an_override_flag() {
        let args = Args::try_parse_from([
            "droopwatch",
            "--baseline-frames",
            "30",
            "--recent-frames",
            "5",
            "--persist-frames",
            "4",
            "--threshold-floor",
            "0.06",
            "--drift-stability-divisor",
            "3.0",
        ])
        .unwrap();

        let detector = build_detector(&args).unwrap();
        let config = detector.config();
        assert_eq!(config.baseline_frames, 30);
        assert_eq!(config.recent_frames, 5);
        assert_eq!(config.persist_frames, 4);
        assert!((config.threshold_floor - 0.06).abs() < 1e-12);
        assert!((config.drift_stability_divisor - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_overrides_refine_presets() {
        let args =
            Args::try_parse_from(["droopwatch", "--strict", "--persist-frames", "2"]).unwrap();
        let detector = build_detector(&args).unwrap();

        // The override wins; untouched preset fields stay
        assert_eq!(detector.config().persist_frames, 2);
        assert!((detector.config().threshold_floor - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_rejected_override_surfaces_config_error() {
        let args = Args::try_parse_from(["droopwatch", "--persist-frames", "0"]).unwrap();
        assert!(build_detector(&args).is_err());
    }

    #[test]
    fn test_verbose_selects_debug_logging() {
        assert_eq!(log_filter(false), "info");
        assert_eq!(log_filter(true), "debug");
    }
}
