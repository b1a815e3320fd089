// ============================================================================
// stock-catcher
// ============================================================================
// Lit une liste de tickers (CAC40 par défaut), récupère prix et dividendes
// depuis Yahoo Finance puis affiche :
// - le tableau complet
// - l'action au meilleur rendement du dividende
// - l'action au meilleur potentiel
//
// Codes de sortie : 0 en cas de succès, 1 si le fichier de tickers est
// introuvable ou si la configuration est invalide.
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use stock_catcher::api::YahooClient;
use stock_catcher::cli::{run, Cli, Outcome};
use stock_catcher::CatcherError;

// ============================================================================
// Initialisation du logging
// ============================================================================
// stdout est réservé au rapport, les logs partent dans un fichier
// ============================================================================

/// Répertoire des logs
///
/// - Linux : ~/.local/share/stock-catcher/logs
/// - macOS : ~/Library/Application Support/stock-catcher/logs
/// - Windows : C:\Users\<user>\AppData\Local\stock-catcher\logs
/// - Sinon : ./logs
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("stock-catcher").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Contrôler le niveau de log
/// RUST_LOG=trace stock-catcher
/// RUST_LOG=stock_catcher=info stock-catcher data/cac40.txt
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Nouveau fichier chaque jour : stock-catcher.log.2024-01-15
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "stock-catcher.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_catcher=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
    });

    info!(?cli, "stock-catcher starting up");

    let result = catch_stocks(&cli);
    match &result {
        Ok(()) => info!("stock-catcher finished"),
        Err(e) => error!(error = ?e, "stock-catcher failed"),
    }

    let outcome = Outcome::from_result(&result);
    match &outcome {
        Outcome::Success => {}
        Outcome::NotFound(message) => println!("{}", message),
        Outcome::Failure(message) => eprintln!("{}", message),
    }
    ExitCode::from(outcome.exit_code())
}

/// Charge la configuration et exécute le programme sur un runtime tokio
///
/// Tout reste séquentiel : un runtime mono-thread suffit.
fn catch_stocks(cli: &Cli) -> stock_catcher::Result<()> {
    let settings = cli.settings()?;
    let provider = YahooClient::new()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| CatcherError::Io {
            path: PathBuf::from("<tokio runtime>"),
            source,
        })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runtime.block_on(run(cli, &settings, &provider, &mut out))
}
