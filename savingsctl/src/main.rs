use clap::Parser;
use savingsctl::{Application, Config, telemetry};
use std::process::ExitCode;

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// `--check-db`: print what the database looks like, failing when it cannot be reached
async fn check_db(config: &Config) -> ExitCode {
    match savingsctl::check_database(config).await {
        Ok(report) => {
            println!("Connected to database '{}' as '{}'", report.database, report.user);
            if let Some(time) = report.server_time {
                println!("Server time: {}", time.to_rfc3339());
            }
            match (report.directory_exists, report.directory_rows) {
                (true, Some(rows)) => println!("Table '{}' exists with {} rows", report.directory_table, rows),
                (true, None) => println!("Table '{}' exists but could not be counted", report.directory_table),
                (false, _) => println!("Table '{}' does not exist", report.directory_table),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Database check failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `--init-db`: create the canonical tables and seed sample use cases
async fn init_db(config: &Config) -> anyhow::Result<()> {
    let pool = config
        .database
        .pool
        .pool_options()
        .connect_with(config.database.connect_options()?)
        .await?;
    let seeded = savingsctl::init_database(&pool).await;
    pool.close().await;

    match seeded? {
        0 => println!("Tables ready; existing use cases left untouched."),
        n => println!("Tables ready; seeded {n} sample use cases."),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Install rustls crypto provider before anything else that might build a TLS client
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Parse CLI args
    let args = savingsctl::config::Args::parse();

    // Load configuration
    let config = Config::load(&args)?;

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return Ok(ExitCode::SUCCESS);
    }

    // Initialize telemetry (tracing + optional OpenTelemetry)
    telemetry::init_telemetry(config.enable_otel_export)?;

    tracing::debug!("{:?}", args);

    if args.check_db {
        return Ok(check_db(&config).await);
    }

    if args.init_db {
        init_db(&config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Run the application with graceful shutdown on SIGTERM/Ctrl+C
    let shutdown = shutdown_signal();
    Application::new(config).await?.serve(shutdown).await?;
    Ok(ExitCode::SUCCESS)
}
