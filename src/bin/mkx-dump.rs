//! Decode hex-encoded LLC messages and print them.
//!
//! Reads one message per line (hex, whitespace and `:`/`-` separators
//! allowed, `#` starts a comment) from a file or stdin. With `--stream` the
//! lines are concatenated and split into messages by their `Len` field.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use mkx_llc::frame::{FrameSplitter, parse_hex};
use mkx_llc::session::{DecodePolicy, Direction};
use mkx_llc::{r16, r17};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Revision {
    R16,
    R17,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Sender {
    /// Messages from the radio (replies and indications).
    Device,
    /// Messages from the host (requests).
    Host,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Debug,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> tracing::level_filters::LevelFilter {
        match self {
            LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
            LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
            LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
            LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
            LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
        }
    }
}

fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.as_filter())
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mkx-dump", version, about = "Decode MKx LLC messages")]
struct Cli {
    /// API revision the messages were captured from.
    #[arg(long, value_enum, default_value = "r17")]
    revision: Revision,

    /// Which side sent the messages. Selects the C2X APDU shape.
    #[arg(long, value_enum, default_value = "device")]
    from: Sender,

    /// Output format (stdout).
    #[arg(long, value_enum, default_value = "debug")]
    format: OutputFormat,

    /// Reject non-zero address-matching padding.
    #[arg(long)]
    strict_padding: bool,

    /// Accept extension bytes after fixed records.
    #[arg(long)]
    allow_trailing: bool,

    /// Treat the input as one byte stream instead of one message per line.
    #[arg(long)]
    stream: bool,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,

    /// Input file; stdin when omitted.
    input: Option<PathBuf>,
}

impl Cli {
    fn policy(&self) -> DecodePolicy {
        let direction = match self.from {
            Sender::Device => Direction::ToHost,
            Sender::Host => Direction::ToDevice,
        };
        DecodePolicy { strict_padding: self.strict_padding, allow_trailing: self.allow_trailing, direction }
    }

    fn header_len(&self) -> usize {
        match self.revision {
            Revision::R16 => r16::HEADER_LEN,
            Revision::R17 => r17::HEADER_LEN,
        }
    }
}

/// Decode one message and render it. `Err` carries the text to report.
fn render(cli: &Cli, policy: &DecodePolicy, bytes: &[u8]) -> Result<String, String> {
    match cli.revision {
        Revision::R16 => {
            let env = r16::Envelope::decode(bytes, policy).map_err(|e| e.to_string())?;
            match cli.format {
                OutputFormat::Debug => Ok(format!("{env:?}")),
                OutputFormat::Json => serde_json::to_string(&env).map_err(|e| e.to_string()),
            }
        }
        Revision::R17 => {
            let env = r17::Envelope::decode(bytes, policy).map_err(|e| e.to_string())?;
            match cli.format {
                OutputFormat::Debug => Ok(format!("{env:?}")),
                OutputFormat::Json => serde_json::to_string(&env).map_err(|e| e.to_string()),
            }
        }
    }
}

fn open(input: Option<&PathBuf>) -> io::Result<Box<dyn BufRead>> {
    Ok(match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let reader = match open(cli.input.as_ref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let policy = cli.policy();
    let mut splitter = FrameSplitter::new(cli.header_len());
    let (mut decoded, mut failed) = (0usize, 0usize);

    for (n, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        };
        let text = line.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let Some(bytes) = parse_hex(text) else {
            warn!(line = n + 1, "not a hex string");
            failed += 1;
            continue;
        };

        let messages = if cli.stream { splitter.feed(&bytes) } else { vec![bytes] };
        for msg in messages {
            match render(&cli, &policy, &msg) {
                Ok(out) => {
                    println!("{out}");
                    decoded += 1;
                }
                Err(e) => {
                    warn!(line = n + 1, error = %e, "decode failed");
                    failed += 1;
                }
            }
        }
    }

    if cli.stream && splitter.pending() > 0 {
        warn!(pending = splitter.pending(), "input ends inside a message");
    }
    info!(decoded, failed, discarded = splitter.discarded(), "done");
    if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_revision_and_direction() {
        let cli = Cli::try_parse_from(["mkx-dump", "--revision", "r16", "--from", "host", "dump.txt"])
            .expect("args should parse");
        assert!(matches!(cli.revision, Revision::R16));
        assert_eq!(cli.policy().direction, Direction::ToDevice);
        assert_eq!(cli.header_len(), 8);
        assert_eq!(cli.input, Some(PathBuf::from("dump.txt")));
    }

    #[test]
    fn renders_r17_get_tsf_request() {
        let cli = Cli::try_parse_from(["mkx-dump"]).expect("defaults should parse");
        let bytes = parse_hex("0E000C0001000200DAC0DAC0").expect("valid hex");
        let out = render(&cli, &cli.policy(), &bytes).expect("decodes");
        assert!(out.starts_with("GetTsf(None) [GetTsf seq=1 ref=2"));
    }

    #[test]
    fn json_output() {
        let cli = Cli::try_parse_from(["mkx-dump", "--revision", "r16", "--format", "json"]).expect("args");
        let bytes = parse_hex("0D000A000300DAC029FD").expect("valid hex");
        let out = render(&cli, &cli.policy(), &bytes).expect("decodes");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["message"]["Temp"]["temp_pa_ant2"], -3);
    }

    #[test]
    fn reports_decode_errors() {
        let cli = Cli::try_parse_from(["mkx-dump", "--revision", "r16"]).expect("args");
        let bytes = parse_hex("13000800 0100 DAC0").expect("valid hex");
        assert!(render(&cli, &cli.policy(), &bytes).unwrap_err().contains("19"));
    }
}
