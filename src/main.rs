use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

use rust_passgen::api::{self, ApiState};
use rust_passgen::cli::{self, handlers, Args, CliCommand};
use rust_passgen::core::{Config, PasswordService};
use rust_passgen::logging;

async fn run(args: Args, config: Config) -> anyhow::Result<bool> {
    let workers = match &args.command {
        Some(CliCommand::Generate { workers: Some(workers), .. }) => *workers,
        _ => config.generator_workers,
    };
    let service = PasswordService::new(&config).with_workers(workers);

    // API-only mode (blocks until the server stops)
    if args.api_only {
        log::info!("API-only mode active. CLI interface disabled.");
        let port = args.api_port.unwrap_or(config.web_port);
        let address = config.web_address.clone();
        let state = Arc::new(ApiState::new(config));
        println!("🚀 API server listening on {}:{}", address, port);

        api::start_server(state, &address, port).await?;
        return Ok(true);
    }

    // JSON mode
    if args.json {
        return api::handlers::handle_json_api(args.command.as_ref(), &config, &service)
            .map_err(|e| anyhow::anyhow!(e.to_string()));
    }

    match args.command {
        Some(CliCommand::Generate { policy, count, output, save, .. }) => {
            handlers::handle_generate(&service, &config, &policy, count, output.as_deref(), save)?;
        }
        Some(CliCommand::Preview { policy }) => {
            handlers::handle_preview(&service, &config, &policy)?;
        }
        Some(CliCommand::Estimate { length, pool_size }) => {
            handlers::handle_estimate(&service, length, pool_size);
        }
        Some(CliCommand::Interactive) | None => {
            let should_exit = Arc::new(AtomicBool::new(false));
            {
                let should_exit = Arc::clone(&should_exit);
                ctrlc::set_handler(move || {
                    log::info!("Ctrl+C received. Shutting down.");
                    should_exit.store(true, Ordering::SeqCst);
                    println!("\n👋 Goodbye!");
                    std::process::exit(0);
                })?;
            }

            cli::menu::run_cli_menu(&service, &config, should_exit)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load();

    if let Err(e) = logging::init(config.log_level, &config.log_file) {
        eprintln!("⚠️ Logging disabled: {}", e);
    }
    log::info!("Starting PassGen");
    for warning in &config.warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Loaded config: {:?}", config);

    match run(args, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
