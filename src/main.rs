//! Mouse remapper daemon.
//!
//! Needs Accessibility permission for the terminal or binary:
//! System Settings > Privacy & Security > Accessibility.

use clap::Parser;
use mouse_remapper::platform::{NativeSynthesizer, NativeTap};
use mouse_remapper::{ActionTable, Config, InterceptionChannel, Remapper};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Remap mouse buttons and reverse scrolling system-wide
#[derive(Parser, Debug)]
#[command(name = "mouse-remapper", version, long_about = None)]
#[command(after_help = "Key codes: Left=123 Right=124 Down=125 Up=126 \
    Tab=48 Space=49 Escape=53 Return=36 Delete=51")]
struct Args {
    /// Path to config file (default: ~/.config/mouse-remapper/config.json)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Generate the default config file and exit
    #[arg(long)]
    generate: bool,

    /// Validate the config, print the mappings and exit
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn log_summary(config: &Config, table: &ActionTable) {
    log::info!("Configuration:");
    log::info!(
        "  Reverse mouse scroll (Y-axis only): {}",
        config.reverse_mouse_scroll
    );
    log::info!("  Reverse trackpad scroll: {}", config.reverse_trackpad_scroll);
    log::info!("Button mappings:");
    if table.is_empty() {
        log::info!("  (none)");
    }
    for line in table.describe() {
        log::info!("{}", line);
    }
}

fn check(config: &Config) -> ExitCode {
    let (table, issues) = ActionTable::build(config);
    println!("Reverse mouse scroll: {}", config.reverse_mouse_scroll);
    println!("Reverse trackpad scroll: {}", config.reverse_trackpad_scroll);
    println!("Key combo delay: {} ms", config.key_combo_delay_ms);
    println!("Button mappings:");
    for line in table.describe() {
        println!("{}", line);
    }
    if issues.is_empty() {
        println!("Configuration is valid");
    } else {
        println!("{} issue(s):", issues.len());
        for issue in &issues {
            println!("  {}", issue);
        }
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);

    if args.generate {
        return match Config::default().save(&config_path) {
            Ok(()) => {
                println!("Generated default config at: {}", config_path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    println!("=== Mouse Remapper Daemon ===");

    let config = Config::load_or_create(Some(&config_path));
    if args.check {
        return check(&config);
    }

    let remapper = Remapper::new(&config, NativeSynthesizer::new());
    log_summary(&config, remapper.transformer().table());

    let channel = Arc::new(InterceptionChannel::new(NativeTap));
    let signal_channel = Arc::clone(&channel);
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received termination signal, shutting down...");
        if let Err(e) = signal_channel.stop() {
            log::error!("Failed to stop interception: {}", e);
        }
    }) {
        log::error!("Failed to install signal handler: {}", e);
        return ExitCode::FAILURE;
    }

    match channel.start(remapper) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
