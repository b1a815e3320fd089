// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
// ============================================================================

pub mod price;      // Historique de prix (analyseur)
pub mod stock_info; // Ligne d'informations par ticker et tableau

// Re-export des structures principales pour simplifier les imports
// On peut faire : use stock_catcher::models::StockInfo;
pub use price::{PricePoint, PriceTable};
pub use stock_info::{StockInfo, StockInfoTable};
