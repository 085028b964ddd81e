use clap::Parser;
use ipspl::{build_query, read_lines, Error, FieldMode, Result};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::exit;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

const MARKER: &str = "==============================";

/// Turn a list of (possibly defanged) IP addresses into a firewall query
#[derive(Parser, Debug)]
#[command(name = "ipspl", version)]
struct Opts {
    /// path/file of file that contains list of IP addresses
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// fields to be included in results: src, dest (or dst), both
    #[arg(short = 't', long = "type")]
    mode: Option<String>,

    /// more logging on stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn usage() -> String {
    let rule = "-".repeat(75);
    format!(
        "Not enough arguments supplied. Usage:\n{}\n\
         \t-i = path/file of file that contains list of IP addresses\n\
         \t-t = fields to be included in results:\n\
         \t\t[src]=src_ip\n\t\t[dest]=dest_ip\n\t\t[both]=both src_ip and dest_ip\n{}",
        rule, rule
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(opts: Opts) -> Result<String> {
    let (input, mode) = match (opts.input, opts.mode) {
        (Some(input), Some(mode)) if !input.as_os_str().is_empty() && !mode.is_empty() => {
            (input, mode)
        }
        _ => return Err(Error::Config(usage())),
    };
    let field = FieldMode::from(mode.as_str());
    if field == FieldMode::Invalid {
        warn!(%mode, "unrecognised field mode, clauses will be empty");
    }
    let lines = read_lines(&input)?;
    info!(path = %input.display(), lines = lines.len(), mode = %field, "read input");
    Ok(build_query(lines, field))
}

fn main() {
    let opts = Opts::parse();
    init_logging(opts.verbose);
    match run(opts) {
        Ok(spl) => {
            println!("{} SNIP {}", MARKER, MARKER);
            println!("{}", spl);
            println!("{} /SNIP {}", MARKER, MARKER);
        }
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}
