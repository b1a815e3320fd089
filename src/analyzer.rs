// ============================================================================
// Structure : StockAnalyzer
// ============================================================================
// Analyse d'un ticker unique, limité à une liste de tickers autorisés.
//
// CONCEPT RUST : pas d'état global
// - La liste autorisée est passée au constructeur (lue depuis la config)
// - Deux analyseurs peuvent avoir des listes différentes
// ============================================================================

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::api::QuoteProvider;
use crate::error::{CatcherError, Result};
use crate::models::PriceTable;

/// Format attendu pour les dates (ISO-8601)
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Analyseur de prix pour un ticker
#[derive(Debug, Clone)]
pub struct StockAnalyzer {
    /// Identifiant unique de l'action
    pub stock_ticker: String,

    allow_tickers: Vec<String>,
}

impl StockAnalyzer {
    /// Crée un analyseur pour `stock_ticker`
    ///
    /// Le ticker n'est vérifié qu'au moment de la requête.
    pub fn new<S: AsRef<str>>(stock_ticker: impl Into<String>, allow_tickers: &[S]) -> Self {
        Self {
            stock_ticker: stock_ticker.into(),
            allow_tickers: allow_tickers.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    /// Vrai si le ticker fait partie de la liste autorisée
    pub fn is_allowed(&self) -> bool {
        self.allow_tickers.iter().any(|t| *t == self.stock_ticker)
    }

    /// Derniers prix du ticker entre `start_date` et `end_date` incluses
    ///
    /// # Exemple
    /// ```no_run
    /// # use stock_catcher::{analyzer::StockAnalyzer, api::YahooClient};
    /// # async fn demo() -> stock_catcher::error::Result<()> {
    /// let client = YahooClient::new()?;
    /// let analyzer = StockAnalyzer::new("ticker1", &["ticker1", "ticker2"]);
    /// let prices = analyzer
    ///     .get_stock_latest_price(&client, "2020-01-01", "2020-02-25")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Erreurs
    /// * `CatcherError::Validation` si le ticker n'est pas autorisé (aucun appel réseau)
    /// * `CatcherError::InvalidDate` / `InvalidDateRange` pour des dates incorrectes
    /// * `CatcherError::Provider` si le fournisseur échoue
    #[instrument(skip(self, provider), fields(ticker = %self.stock_ticker))]
    pub async fn get_stock_latest_price<P: QuoteProvider>(
        &self,
        provider: &P,
        start_date: &str,
        end_date: &str,
    ) -> Result<PriceTable> {
        if !self.is_allowed() {
            return Err(CatcherError::Validation {
                ticker: self.stock_ticker.clone(),
            });
        }

        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        if start > end {
            return Err(CatcherError::InvalidDateRange {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }

        println!(
            "Getting latest price for stock ticker: {} with start date: {} and end date: {}",
            self.stock_ticker, start_date, end_date
        );
        info!(%start, %end, "Getting latest price");

        let points = provider
            .fetch_price_history(&self.stock_ticker, start, end)
            .await?;

        Ok(PriceTable::with_points(self.stock_ticker.clone(), points))
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| CatcherError::InvalidDate {
        value: value.to_string(),
        source,
    })
}
