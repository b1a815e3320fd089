// ============================================================================
// Erreurs de stock-catcher
// ============================================================================
// Une seule enum pour toutes les erreurs que la bibliothèque peut remonter
//
// CONCEPTS RUST :
// 1. thiserror : génère Display et std::error::Error depuis les attributs
// 2. #[from] : conversion automatique utilisée par l'opérateur ?
// 3. Le client Yahoo reste en anyhow (contexte riche), on l'enveloppe ici
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Erreurs remontées par stock-catcher
#[derive(Debug, Error)]
pub enum CatcherError {
    /// Le fichier de tickers n'existe pas
    #[error("The given file path {} not found", .path.display())]
    FileNotFound { path: PathBuf },

    /// Autre erreur d'entrée/sortie lors de la lecture d'un fichier
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration absente ou mal formée
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ticker absent de la liste autorisée de l'analyseur
    #[error("The stock ticker {ticker} is no longer valid.")]
    Validation { ticker: String },

    /// Date qui n'est pas au format YYYY-MM-DD
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Date de début postérieure à la date de fin
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    /// Échec du fournisseur de données (réseau, HTTP, JSON)
    #[error("Data provider error: {0:#}")]
    Provider(#[from] anyhow::Error),
}

/// Alias pratique pour les fonctions de la bibliothèque
pub type Result<T> = std::result::Result<T, CatcherError>;
