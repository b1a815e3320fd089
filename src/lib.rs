// ============================================================================
// stock-catcher - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod analyzer; // Analyse de prix d'un ticker autorisé
pub mod api;      // Fournisseurs de données (Yahoo Finance)
pub mod catcher;  // Récupération des infos et classement
pub mod cli;      // Arguments et déroulement du programme
pub mod config;   // Configuration embarquée (config.toml)
pub mod error;    // Erreurs de la bibliothèque
pub mod models;   // Structures de données
pub mod tickers;  // Lecture des fichiers de tickers

pub use error::{CatcherError, Result};
