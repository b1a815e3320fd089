// ============================================================================
// Module : api
// ============================================================================
// Fournisseurs de données boursières. Le reste du crate ne dépend que du
// trait QuoteProvider, ce qui permet de brancher un stub en test.
//
// CONCEPT RUST : async fn dans un trait
// - Supporté nativement depuis Rust 1.75
// - Utilisé ici en dispatch statique (génériques), pas de Box<dyn>
// ============================================================================

pub mod yahoo; // Client API Yahoo Finance

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{PricePoint, StockInfo};

pub use yahoo::YahooClient;

/// Source externe de prix et dividendes
#[allow(async_fn_in_trait)]
pub trait QuoteProvider {
    /// Prix, rendement du dividende et potentiel d'un ticker
    async fn fetch_stock_info(&self, symbol: &str) -> Result<StockInfo>;

    /// Prix de clôture journaliers entre deux dates incluses
    async fn fetch_price_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>>;
}
