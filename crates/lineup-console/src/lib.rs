//! Colorful console output for lineup solver events.
//!
//! Provides a custom `tracing` layer that formats relay and league events
//! with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (relay and league solve start/end, model size)
//! - **WARN**: Data-quality problems and node-limit stops
//! - **DEBUG**: Incumbent improvements during the league search

use lineup_core::format_ms;
use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing; `RUST_LOG` overrides the
/// default `info` level.
pub fn init() {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(LineupConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

fn print_banner() {
    let banner = r#"
 _ _
| (_)_ __   ___ _   _ _ __
| | | '_ \ / _ \ | | | '_ \
| | | | | |  __/ |_| | |_) |
|_|_|_| |_|\___|\__,_| .__/
                     |_|
"#;

    let version_line = format!("        v{} - Swim Team Composer\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats lineup events with colors.
pub struct LineupConsoleLayer;

impl<S: Subscriber> Layer<S> for LineupConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("lineup") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    rule: Option<String>,
    policy: Option<String>,
    status: Option<String>,
    backend: Option<String>,
    swimmer: Option<String>,
    pool_size: Option<u64>,
    teams: Option<u64>,
    evaluated: Option<u64>,
    best_total_ms: Option<u64>,
    duration_ms: Option<u64>,
    swimmer_count: Option<u64>,
    event_count: Option<u64>,
    pool_length: Option<u64>,
    assignment_vars: Option<u64>,
    constraints: Option<u64>,
    roster_size: Option<u64>,
    uncovered: Option<u64>,
    nodes: Option<u64>,
    relaxations: Option<u64>,
    total_points: Option<i64>,
    value: Option<i64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "message" => self.message = Some(value),
            "rule" => self.rule = Some(value),
            "policy" => self.policy = Some(value),
            "status" => self.status = Some(value),
            "backend" => self.backend = Some(value),
            "swimmer" => self.swimmer = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "pool_size" => self.pool_size = Some(value),
            "teams" => self.teams = Some(value),
            "evaluated" => self.evaluated = Some(value),
            "best_total_ms" => self.best_total_ms = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "swimmer_count" => self.swimmer_count = Some(value),
            "event_count" => self.event_count = Some(value),
            "pool_length" => self.pool_length = Some(value),
            "assignment_vars" => self.assignment_vars = Some(value),
            "constraints" => self.constraints = Some(value),
            "roster_size" => self.roster_size = Some(value),
            "uncovered" => self.uncovered = Some(value),
            "nodes" => self.nodes = Some(value),
            "relaxations" => self.relaxations = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "total_points" => self.total_points = Some(value),
            "value" => self.value = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "relay_start" => format_relay_start(v),
        "relay_end" => format_relay_end(v),
        "solve_start" => format_solve_start(v),
        "model_built" => format_model_built(v),
        "solve_end" => format_solve_end(v),
        "node_limit" if level == Level::WARN => format_warning(v),
        "data_quality" => format_warning(v),
        "incumbent" => format_incumbent(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_relay_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} │ {} │ {} swimmers",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.rule.as_deref().unwrap_or("relay").white().bold(),
        v.policy.as_deref().unwrap_or("?").bright_magenta(),
        count(v.pool_size).bright_yellow(),
    )
}

fn format_relay_end(v: &EventVisitor) -> String {
    let teams = v.teams.unwrap_or(0);
    let best = if teams > 0 {
        let ms = v.best_total_ms.unwrap_or(0);
        format_ms(u32::try_from(ms).unwrap_or(u32::MAX))
            .bright_green()
            .bold()
            .to_string()
    } else {
        "no team".bright_red().bold().to_string()
    };

    format!(
        "{} {} {} teams │ {} evaluated │ best {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.teams).white(),
        count(v.evaluated).bright_magenta(),
        best,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} League │ {} swimmers │ {} events │ {}m pool",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.swimmer_count).bright_yellow(),
        count(v.event_count).bright_yellow(),
        v.pool_length.unwrap_or(0).bright_yellow(),
    );
    if let Some(backend) = &v.backend {
        output.push_str(&format!(" │ {}", backend.bright_black()));
    }
    output
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} Model │ {} assignment variables │ {} constraints",
        format_elapsed(),
        "▸".bright_blue(),
        count(v.assignment_vars).white(),
        count(v.constraints).white(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let points = v.total_points.unwrap_or(0);

    let mut output = format!(
        "{} {} League complete │ {} points │ {} swimmers │ {} nodes │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_points(points),
        count(v.roster_size).white(),
        count(v.nodes).bright_magenta(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    // Summary box
    let status_text = match status {
        "optimal" => "OPTIMAL ROSTER FOUND",
        "feasible" => "FEASIBLE ROSTER (node limit reached)",
        _ => "NO ROSTER",
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_colored = match status {
        "optimal" => status_text.bright_green().bold().to_string(),
        "feasible" => status_text.bright_yellow().bold().to_string(),
        _ => status_text.bright_red().bold().to_string(),
    };

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Total points:",
        points,
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Uncovered events:",
        v.uncovered.unwrap_or(0),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_incumbent(v: &EventVisitor) -> String {
    format!(
        "{} {} Incumbent {} │ node {}",
        format_elapsed(),
        "↑".bright_green(),
        format_points(v.value.unwrap_or(0)),
        count(v.nodes).bright_black(),
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {}",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        v.message.as_deref().unwrap_or("warning").yellow(),
    );
    if let Some(swimmer) = &v.swimmer {
        output.push_str(&format!(" │ swimmer {}", swimmer.white()));
    }
    output
}

fn format_points(points: i64) -> String {
    let text = points.to_formatted_string(&Locale::en);
    if points < 0 {
        text.bright_red().to_string()
    } else if points > 0 {
        text.bright_green().to_string()
    } else {
        text.white().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
