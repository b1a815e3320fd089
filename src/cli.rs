// ============================================================================
// Ligne de commande
// ============================================================================
// Déroulement : résolution du chemin -> récupération -> rapport
//
// CONCEPT RUST : Write générique
// - run() écrit dans n'importe quel `impl Write` (stdout, Vec<u8> en test)
// - Outcome traduit le résultat en message et code de sortie pour main.rs
// ============================================================================

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::api::QuoteProvider;
use crate::catcher::{get_stock_infos, get_top_dividend_yield_stock, get_top_potential_stock};
use crate::config::Settings;
use crate::error::{CatcherError, Result};
use crate::tickers::get_fr_stock_tickers;

/// Code de sortie en cas d'échec (fichier introuvable, configuration, ...)
pub const FAILURE_EXIT_CODE: u8 = 1;

/// Trouve les actions au meilleur rendement et au meilleur potentiel
#[derive(Parser, Debug)]
#[command(name = "stock-catcher", version, about, long_about = None)]
pub struct Cli {
    /// Fichier de tickers, un par ligne (défaut : liste CAC40 de la config)
    pub stock_file_path: Option<PathBuf>,

    /// Fichier de configuration TOML remplaçant la configuration embarquée
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Charge la configuration demandée (--config ou embarquée)
    pub fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(path) => Settings::from_file(path),
            None => Settings::packaged(),
        }
    }
}

/// Issue du programme, telle que main.rs doit la rapporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rapport écrit, rien d'autre à afficher
    Success,

    /// Fichier de tickers introuvable : message sur stdout
    NotFound(String),

    /// Toute autre erreur : message sur stderr
    Failure(String),
}

impl Outcome {
    pub fn from_result(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(e @ CatcherError::FileNotFound { .. }) => Outcome::NotFound(e.to_string()),
            Err(e) => Outcome::Failure(format!("Error: {}", e)),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::NotFound(_) | Outcome::Failure(_) => FAILURE_EXIT_CODE,
        }
    }
}

/// Lit les tickers, récupère les infos et écrit le rapport dans `out`
pub async fn run<P, W>(cli: &Cli, settings: &Settings, provider: &P, out: &mut W) -> Result<()>
where
    P: QuoteProvider,
    W: Write,
{
    let stock_tickers = match &cli.stock_file_path {
        Some(path) => {
            info!(path = %path.display(), "Using stock ticker file");
            get_fr_stock_tickers(path)?
        }
        None => {
            info!(path = %settings.default_cac_file_path().display(), "Using default ticker list");
            settings.default_tickers()?
        }
    };
    let stock_infos = get_stock_infos(provider, &stock_tickers).await;

    let top_div = get_top_dividend_yield_stock(&stock_infos);
    let top_pot = get_top_potential_stock(&stock_infos);

    write_report(out, &stock_infos, &top_div, &top_pot).map_err(|source| CatcherError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

fn write_report<W: Write>(
    out: &mut W,
    stock_infos: &impl std::fmt::Display,
    top_div: &impl std::fmt::Display,
    top_pot: &impl std::fmt::Display,
) -> std::io::Result<()> {
    writeln!(out, "{}", stock_infos)?;
    writeln!(out, "Top Dividend:\n{}", top_div)?;
    writeln!(out, "Top potential:\n{}", top_pot)?;
    out.flush()
}
