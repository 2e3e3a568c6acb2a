use clap::Parser;
use colored::*;
use preview_doctor::cli::Cli;
use preview_doctor::config::Config;
use preview_doctor::run;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "warn,preview_doctor=debug"
        } else {
            "warn"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // Tracing depends on the merged verbosity, so the config path is logged after init
    let config_path = Config::locate(&args);
    let args = match config_path.as_deref().map(Config::from_file).transpose() {
        Ok(Some(config)) => config.merge_with_cli(&args),
        Ok(None) => args,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            std::process::exit(1);
        }
    };

    init_tracing(args.verbose);
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "Loaded config file");
    }

    match run(args).await {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            std::process::exit(1);
        }
    }
}
