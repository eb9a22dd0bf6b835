use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::cli::{self, CliConfig, Commands, FilterArgs};
use crate::core::config::FilterConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::types::{LogEntry, Span};
use crate::domain::filter::{FilterSet, RecordShape, parse_filters};

pub struct CoreApp {
    pub config: FilterConfig,
}

/// Records read and written by one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub read: usize,
    pub skipped: usize,
    pub matched: usize,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config)?;
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());

        let stats = match &command {
            Commands::Logs(args) => {
                let filters = app.load_filters(args, RecordShape::Logs)?;
                let input = open_input(args)?;
                app.filter_logs(&filters, input, &mut out)?
            }
            Commands::Spans(args) => {
                let filters = app.load_filters(args, RecordShape::Spans)?;
                let input = open_input(args)?;
                app.filter_spans(&filters, input, &mut out)?
            }
        };
        out.flush().context("Failed to flush output")?;

        tracing::info!(
            read = stats.read,
            skipped = stats.skipped,
            matched = stats.matched,
            "Filtering complete"
        );
        Ok(())
    }

    pub fn init(cli: &CliConfig) -> Result<Self> {
        let config = FilterConfig::load(cli)?;
        Ok(Self { config })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Parse the `--filters` argument, inline JSON or `@path`, for records of `shape`
    pub fn load_filters(&self, args: &FilterArgs, shape: RecordShape) -> Result<FilterSet> {
        let json = match args.filters.strip_prefix('@') {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read filters file: {}", path))?,
            None => args.filters.clone(),
        };
        let filters = parse_filters(&json, &self.config.limits, shape).context("Invalid filters")?;
        let set: FilterSet = filters.into_iter().collect();
        tracing::debug!(count = set.len(), "Active filters");
        Ok(set)
    }

    /// Stream JSON Lines log entries through the filter set
    pub fn filter_logs<R: BufRead, W: Write>(
        &self,
        filters: &FilterSet,
        input: R,
        out: &mut W,
    ) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut read_error = None;
        let mut matched = 0;
        {
            let entries = read_records::<LogEntry, _>(input, &mut stats, &mut read_error);
            for entry in filters.apply_all(entries)? {
                write_record(out, &entry)?;
                matched += 1;
            }
        }
        stats.matched = matched;
        if let Some(e) = read_error {
            return Err(e).context("Failed to read input");
        }
        Ok(stats)
    }

    /// Stream JSON Lines spans through the filter set
    pub fn filter_spans<R: BufRead, W: Write>(
        &self,
        filters: &FilterSet,
        input: R,
        out: &mut W,
    ) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut read_error = None;
        let mut matched = 0;
        {
            let spans = read_records::<Span, _>(input, &mut stats, &mut read_error);
            for span in spans {
                if filters.matches_all(&span)? {
                    write_record(out, &span)?;
                    matched += 1;
                }
            }
        }
        stats.matched = matched;
        if let Some(e) = read_error {
            return Err(e).context("Failed to read input");
        }
        Ok(stats)
    }
}

fn open_input(args: &FilterArgs) -> Result<Box<dyn BufRead>> {
    match &args.input {
        Some(path) => open_file(path),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_file(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Lazily decode one record per non-empty line.
///
/// Lines that fail to decode are skipped with a warning. The first I/O error
/// ends the stream and is stored in `read_error`.
fn read_records<'a, T, R>(
    input: R,
    stats: &'a mut RunStats,
    read_error: &'a mut Option<io::Error>,
) -> impl Iterator<Item = T> + 'a
where
    T: DeserializeOwned + 'a,
    R: BufRead + 'a,
{
    input
        .lines()
        .map_while(move |line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                *read_error = Some(e);
                None
            }
        })
        .filter(|line| !line.trim().is_empty())
        .filter_map(move |line| {
            stats.read += 1;
            match serde_json::from_str::<T>(&line) {
                Ok(record) => Some(record),
                Err(e) => {
                    stats.skipped += 1;
                    tracing::warn!(line = stats.read, error = %e, "Skipping malformed record");
                    None
                }
            }
        })
}

fn write_record<W: Write, T: Serialize>(out: &mut W, record: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, record).context("Failed to write record")?;
    out.write_all(b"\n").context("Failed to write record")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGS: &str = r#"{"timestamp":"2024-01-15T10:00:00Z","severity":"Information","message":"started"}
{"timestamp":"2024-01-15T10:01:00Z","severity":"Warning","message":"slow query","attributes":{"db.system":"postgresql"}}

not json
{"timestamp":"2024-01-15T10:02:00Z","severity":"Error","message":"query timeout"}
"#;

    fn app() -> CoreApp {
        CoreApp {
            config: FilterConfig::default(),
        }
    }

    fn filter_args(filters: &str) -> FilterArgs {
        FilterArgs {
            filters: filters.to_string(),
            input: None,
        }
    }

    #[test]
    fn filter_logs_streams_matches() {
        let app = app();
        let filters = app
            .load_filters(
                &filter_args(r#"[{"field":"Severity","condition":">=","value":"warning"}]"#),
                RecordShape::Logs,
            )
            .unwrap();
        let mut out = Vec::new();
        let stats = app.filter_logs(&filters, LOGS.as_bytes(), &mut out).unwrap();

        assert_eq!(
            stats,
            RunStats {
                read: 4,
                skipped: 1,
                matched: 2
            }
        );
        let lines: Vec<LogEntry> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let messages: Vec<&str> = lines.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["slow query", "query timeout"]);
    }

    #[test]
    fn load_filters_validates_literals() {
        let app = app();
        let filters = app.load_filters(&filter_args("[]"), RecordShape::Logs).unwrap();
        assert!(filters.is_empty());

        let result = app.load_filters(
            &filter_args(r#"[{"field":"TimeStamp","condition":">","value":"soon"}]"#),
            RecordShape::Logs,
        );
        assert!(result.is_err());
    }

    #[test]
    fn filter_spans_streams_matches() {
        let spans = r#"{"trace_id":"t1","span_id":"a","name":"GET /health","kind":"Server","status":"Ok"}
{"trace_id":"t1","span_id":"b","name":"SELECT","kind":"Client","status":"Error","attributes":{"db.system":"postgresql"}}
"#;
        let app = app();
        let filters = app
            .load_filters(
                &filter_args(
                    r#"[{"field":"Status","condition":"=","value":"error"},
                        {"field":"db.system","condition":"contains","value":"postgres"}]"#,
                ),
                RecordShape::Spans,
            )
            .unwrap();
        let mut out = Vec::new();
        let stats = app
            .filter_spans(&filters, spans.as_bytes(), &mut out)
            .unwrap();
        assert_eq!(stats.matched, 1);
        let span: Span = serde_json::from_str(String::from_utf8(out).unwrap().trim()).unwrap();
        assert_eq!(span.span_id, "b");
    }

    #[test]
    fn load_filters_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"field":"Message","condition":"contains","value":"x"}]"#)
            .unwrap();
        let args = filter_args(&format!("@{}", file.path().display()));
        let filters = app().load_filters(&args, RecordShape::Logs).unwrap();
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn load_filters_respects_limits() {
        let mut app = app();
        app.config.limits.max_filters = 1;
        let result = app.load_filters(
            &filter_args(
                r#"[{"field":"Message","condition":"=","value":"a"},
                    {"field":"Message","condition":"=","value":"b"}]"#,
            ),
            RecordShape::Logs,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_filters_checks_the_target_shape() {
        let app = app();
        let ordered = filter_args(r#"[{"field":"TimeStamp","condition":">","value":"2024-01-01"}]"#);
        assert!(app.load_filters(&ordered, RecordShape::Logs).is_ok());
        assert!(app.load_filters(&ordered, RecordShape::Spans).is_err());

        let text = filter_args(r#"[{"field":"Severity","condition":"contains","value":"hi"}]"#);
        assert!(app.load_filters(&text, RecordShape::Logs).is_err());
        assert_eq!(app.load_filters(&text, RecordShape::Spans).unwrap().len(), 1);
    }
}
