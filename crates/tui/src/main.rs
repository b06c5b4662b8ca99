mod app;

use std::{
    env,
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{anyhow, bail, Context, Result};
use fleet_core::{
    build_logger,
    config::{self, AppConfig},
    demo, line_count, ConsoleStream, Fleet, FleetReport, LineStats, LoggerKind, MemoryLogger,
};
use serde::Serialize;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

const USAGE: &str = "\
usage: fleetview [--tui] [--json] [--logger <console|file|tracing|memory>] [--count-lines <path>]

  --tui                 browse the fleet interactively; activity is shown in
                        the log pane, so --logger and --json do not apply
  --json                print the fleet report as JSON; console activity
                        goes to stderr
  --logger <kind>       where fleet activity messages go
  --count-lines <path>  append line statistics for a file or directory
";

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: FleetReport<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_stats: Option<LineStats>,
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    tui: bool,
    json: bool,
    logger: Option<LoggerKind>,
    count_lines: Option<PathBuf>,
    help: bool,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--tui" => options.tui = true,
                "--json" => options.json = true,
                "-h" | "--help" => options.help = true,
                "--logger" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--logger requires a value"))?;
                    options.logger = Some(value.parse()?);
                }
                "--count-lines" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--count-lines requires a path"))?;
                    options.count_lines = Some(PathBuf::from(value));
                }
                other => bail!("unrecognised argument '{other}'\n\n{USAGE}"),
            }
        }
        if options.tui && (options.logger.is_some() || options.json) {
            bail!("--tui shows fleet activity in its log pane and cannot be combined with --logger or --json");
        }
        Ok(options)
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(kind) = self.logger {
            config.logger = kind;
        }
        if self.tui {
            config.interactive = true;
        }
        if self.json {
            config.console_stream = ConsoleStream::Stderr;
        }
    }
}

fn main() -> Result<()> {
    let options = Options::parse(env::args().skip(1))?;
    if options.help {
        print!("{USAGE}");
        return Ok(());
    }

    init_logging()?;

    config::ensure_default_config()?;
    let mut config = AppConfig::load().context("failed to load configuration")?;
    options.apply(&mut config);
    tracing::debug!(?config, "configuration loaded");

    if config.interactive {
        return run_browser();
    }

    print!("{}", render_report(&config, &options)?);
    Ok(())
}

/// Build the demo fleet and produce everything destined for stdout.
fn render_report(config: &AppConfig, options: &Options) -> Result<String> {
    let logger = build_logger(config).context("failed to create fleet logger")?;
    let mut fleet = Fleet::new(logger.as_ref());
    for vehicle in demo::company_fleet_vehicles() {
        fleet.add(vehicle);
    }

    let line_stats = match options.count_lines.as_ref() {
        Some(path) => Some(
            line_count::analyze_tree(path)
                .with_context(|| format!("failed to analyze {}", path.display()))?,
        ),
        None => None,
    };

    if options.json {
        let output = JsonOutput {
            report: fleet.report(),
            line_stats,
        };
        let mut json =
            serde_json::to_string_pretty(&output).context("failed to serialize fleet report")?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = fleet.display_all();
    let total = fleet.total_value();
    out.push_str(&format!("\nTotal fleet value: ${}\n", total.normalize()));
    if let Some(stats) = line_stats {
        out.push('\n');
        out.push_str(&stats.render());
    }
    Ok(out)
}

fn run_browser() -> Result<()> {
    let logger = MemoryLogger::new();
    let mut fleet = Fleet::new(&logger);
    for vehicle in demo::company_fleet_vehicles() {
        fleet.add(vehicle);
    }
    let mut app = app::FleetApp::new(fleet, &logger);
    app.run()
}

fn init_logging() -> Result<()> {
    let log_dir = env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("fleetview.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let env_filter = log_filter(env::var(EnvFilter::DEFAULT_ENV).ok());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// `RUST_LOG`-style directives, defaulting to `info` so the tracing sink is visible.
fn log_filter(directives: Option<String>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{FleetLogger, TracingLogger};
    use std::{io, sync::Arc};
    use tempfile::tempdir;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            let bytes = self.0.lock().map(|buf| buf.clone()).unwrap_or_default();
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for SharedBuffer {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if let Ok(mut buf) = self.0.lock() {
                buf.extend_from_slice(data);
            }
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn parse(args: &[&str]) -> Result<Options> {
        Options::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn parses_flags() -> Result<()> {
        let options = parse(&["--json", "--logger", "file", "--count-lines", "src"])?;
        assert!(options.json);
        assert!(!options.tui);
        assert_eq!(options.logger, Some(LoggerKind::File));
        assert_eq!(options.count_lines, Some(PathBuf::from("src")));
        Ok(())
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--logger"]).is_err());
        assert!(parse(&["--logger", "syslog"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }

    #[test]
    fn tui_rejects_logger_and_json() {
        assert!(parse(&["--tui", "--logger", "file"]).is_err());
        assert!(parse(&["--json", "--tui"]).is_err());
        assert!(parse(&["--tui"]).is_ok());
    }

    #[test]
    fn tracing_sink_visible_without_rust_log() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::registry().with(log_filter(None)).with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );
        tracing::subscriber::with_default(subscriber, || {
            TracingLogger.log("Vehicle added: Sedan");
            tracing::debug!("below the default level");
        });
        let captured = buffer.contents();
        assert!(captured.contains("Vehicle added: Sedan"));
        assert!(!captured.contains("below the default level"));
    }

    #[test]
    fn rust_log_directives_still_apply() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::registry()
            .with(log_filter(Some("warn".to_string())))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(move || writer.clone()),
            );
        tracing::subscriber::with_default(subscriber, || {
            TracingLogger.log("Displaying fleet");
        });
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn json_report_parses_with_default_console_logger() -> Result<()> {
        let options = parse(&["--json"])?;
        let mut config = AppConfig::default();
        options.apply(&mut config);
        assert_eq!(config.logger, LoggerKind::Console);
        assert_eq!(config.console_stream, ConsoleStream::Stderr);

        let output = render_report(&config, &options)?;
        let value: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!(value["vehicles"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["total_value"], "225000");
        assert!(value.get("line_stats").is_none());
        Ok(())
    }

    #[test]
    fn json_report_embeds_line_stats() -> Result<()> {
        let dir = tempdir()?;
        let source = dir.path().join("main.rs");
        fs::write(&source, "// entry\nfn main() { run(); }\n")?;

        let options = Options {
            json: true,
            count_lines: Some(source),
            ..Options::default()
        };
        let mut config = AppConfig::default();
        options.apply(&mut config);

        let value: serde_json::Value = serde_json::from_str(&render_report(&config, &options)?)?;
        assert_eq!(value["line_stats"]["physical"], 2);
        assert_eq!(value["line_stats"]["comments"], 1);
        Ok(())
    }

    #[test]
    fn text_report_lists_fleet_and_total() -> Result<()> {
        let options = parse(&[])?;
        let config = AppConfig {
            logger: LoggerKind::Memory,
            ..AppConfig::default()
        };
        let output = render_report(&config, &options)?;
        assert!(output.starts_with(fleet_core::FLEET_BANNER));
        assert!(output.ends_with("\nTotal fleet value: $225000\n"));
        assert!(!output.contains("[Console]"));
        Ok(())
    }

    #[test]
    fn options_override_config() -> Result<()> {
        let mut config = AppConfig::default();
        parse(&["--tui", "--logger", "tracing"])?.apply(&mut config);
        assert!(config.interactive);
        assert_eq!(config.logger, LoggerKind::Tracing);
        Ok(())
    }
}
