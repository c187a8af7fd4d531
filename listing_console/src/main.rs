//! # Listing Console
//!
//! Main entry point for the listing reuse console.

use listing_console::ListingSession;
use services_listing_host::SimListingHost;
use services_listing_reuse::ReuseConfig;
use std::env;
use std::fs;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

/// Parsed command-line options
#[derive(Debug, Default)]
struct ConsoleOptions {
    config: Option<String>,
    script: Option<String>,
    home: Option<String>,
    no_magic: bool,
    magic_name: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let config = build_config(&options).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        process::exit(1);
    });
    tracing::info!(
        use_magic_buffer = config.use_magic_buffer,
        magic_buffer_name = %config.magic_buffer_name,
        "starting listing console"
    );

    let mut host = SimListingHost::new();
    if let Some(home) = &options.home {
        host = host.with_home(home.clone());
    }
    let mut session = ListingSession::new(host, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &options.script {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Failed to read script file: {}", e);
                process::exit(1);
            });
            session.run(text.as_bytes(), &mut out)
        }
        None => session.run(io::stdin().lock(), &mut out),
    };

    if let Err(e) = result {
        eprintln!("Session error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<ConsoleOptions, String> {
    let mut options = ConsoleOptions::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                options.config = Some(value(args, i, "--config")?);
            }
            "--script" | "-s" => {
                i += 1;
                options.script = Some(value(args, i, "--script")?);
            }
            "--home" => {
                i += 1;
                options.home = Some(value(args, i, "--home")?);
            }
            "--magic-name" => {
                i += 1;
                options.magic_name = Some(value(args, i, "--magic-name")?);
            }
            "--no-magic" => {
                options.no_magic = true;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn value(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn build_config(options: &ConsoleOptions) -> Result<ReuseConfig, String> {
    let mut config = match &options.config {
        Some(path) => ReuseConfig::load(path).map_err(|e| e.to_string())?,
        None => ReuseConfig::default(),
    };
    if options.no_magic {
        config = config.with_magic(false);
    }
    if let Some(name) = &options.magic_name {
        config = config.with_magic_name(name.clone());
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      JSON reuse config");
    eprintln!("  -s, --script <FILE>      Command script (reads stdin if omitted)");
    eprintln!("  --home <DIR>             Home directory used to abbreviate names");
    eprintln!("  --magic-name <NAME>      Persistent listing name (default *dired*)");
    eprintln!("  --no-magic               Disable the persistent listing name");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/home_listing.txt --home /home/ana", program);
    eprintln!("  RUST_LOG=debug {} --no-magic", program);
}
