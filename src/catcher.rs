// ============================================================================
// Catcher : récupération des infos et classement
// ============================================================================
// get_stock_infos interroge le fournisseur ticker par ticker, dans l'ordre.
// Les fonctions de classement ne modifient jamais le tableau reçu.
// ============================================================================

use tracing::{debug, info, instrument, warn};

use crate::api::QuoteProvider;
use crate::models::{StockInfo, StockInfoTable};

/// Récupère les informations de chaque ticker
///
/// Un ticker en échec (inconnu, radié, réseau) donne une ligne vide
/// (`StockInfo::missing`) ; le lot n'est jamais interrompu.
#[instrument(skip(provider, tickers), fields(count = tickers.len()))]
pub async fn get_stock_infos<P, S>(provider: &P, tickers: &[S]) -> StockInfoTable
where
    P: QuoteProvider,
    S: AsRef<str>,
{
    let mut table = StockInfoTable::new();

    for (i, ticker) in tickers.iter().enumerate() {
        let symbol = ticker.as_ref();
        debug!(ticker = %symbol, progress = i + 1, total = tickers.len(), "Fetching stock info");

        match provider.fetch_stock_info(symbol).await {
            Ok(row) => table.push(row),
            Err(e) => {
                warn!(ticker = %symbol, error = ?e, "Failed to fetch stock info, keeping empty row");
                table.push(StockInfo::missing(symbol));
            }
        }
    }

    let missing = table.iter().filter(|row| row.is_missing()).count();
    info!(rows = table.len(), missing, "Stock infos fetched");
    table
}

/// Action au meilleur rendement du dividende
pub fn get_top_dividend_yield_stock(table: &StockInfoTable) -> StockInfoTable {
    top_by(table, |row| row.dividend_yield)
}

/// Action au meilleur potentiel
pub fn get_top_potential_stock(table: &StockInfoTable) -> StockInfoTable {
    top_by(table, |row| row.potential)
}

/// Retourne la ligne de valeur maximale pour la métrique donnée
///
/// Les valeurs absentes ou NaN sont ignorées. En cas d'égalité, la première
/// ligne dans l'ordre du tableau l'emporte (comparaison stricte).
fn top_by<F>(table: &StockInfoTable, metric: F) -> StockInfoTable
where
    F: Fn(&StockInfo) -> Option<f64>,
{
    let mut best: Option<(&StockInfo, f64)> = None;

    for row in table.iter() {
        let Some(value) = metric(row).filter(|v| !v.is_nan()) else {
            continue;
        };
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((row, value)),
        }
    }

    best.map(|(row, _)| row.clone()).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::models::PricePoint;

    /// Fournisseur en mémoire : les tickers absents échouent
    #[derive(Default)]
    struct StubProvider {
        infos: HashMap<String, StockInfo>,
        calls: RefCell<Vec<String>>,
    }

    impl StubProvider {
        fn with(rows: Vec<StockInfo>) -> Self {
            Self {
                infos: rows.into_iter().map(|r| (r.symbol.clone(), r)).collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl QuoteProvider for StubProvider {
        async fn fetch_stock_info(&self, symbol: &str) -> Result<StockInfo> {
            self.calls.borrow_mut().push(symbol.to_string());
            self.infos
                .get(symbol)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unknown ticker {}", symbol))
        }

        async fn fetch_price_history(
            &self,
            _symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PricePoint>> {
            Ok(Vec::new())
        }
    }

    fn row(symbol: &str, dividend_yield: Option<f64>, potential: Option<f64>) -> StockInfo {
        StockInfo {
            price: Some(100.0),
            dividend_yield,
            potential,
            ..StockInfo::new(symbol.to_string())
        }
    }

    fn table(rows: Vec<StockInfo>) -> StockInfoTable {
        StockInfoTable::from(rows)
    }

    #[tokio::test]
    async fn test_get_stock_infos_keeps_input_order() {
        let provider = StubProvider::with(vec![
            row("A", Some(1.0), Some(5.0)),
            row("B", Some(3.0), Some(2.0)),
        ]);

        let result = get_stock_infos(&provider, &["B", "A"]).await;

        let symbols: Vec<&str> = result.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A"]);
        assert_eq!(*provider.calls.borrow(), vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_get_stock_infos_failure_gives_missing_row() {
        let provider = StubProvider::with(vec![row("A", Some(1.0), Some(5.0))]);
        let tickers = vec!["A".to_string(), "DELISTED".to_string()];

        let result = get_stock_infos(&provider, &tickers).await;

        assert_eq!(result.len(), 2);
        assert!(!result.rows[0].is_missing());
        assert_eq!(result.rows[1], StockInfo::missing("DELISTED"));
    }

    #[tokio::test]
    async fn test_get_stock_infos_empty() {
        let provider = StubProvider::default();
        let tickers: Vec<String> = Vec::new();

        let result = get_stock_infos(&provider, &tickers).await;

        assert!(result.is_empty());
        assert!(provider.calls.borrow().is_empty());
    }

    #[test]
    fn test_top_rows() {
        let infos = table(vec![
            row("A", Some(1.0), Some(5.0)),
            row("B", Some(3.0), Some(2.0)),
        ]);

        let top_div = get_top_dividend_yield_stock(&infos);
        let top_pot = get_top_potential_stock(&infos);

        assert_eq!(top_div.len(), 1);
        assert_eq!(top_div.rows.first().map(|r| r.symbol.as_str()), Some("B"));
        assert_eq!(top_pot.len(), 1);
        assert_eq!(top_pot.rows.first().map(|r| r.symbol.as_str()), Some("A"));
    }

    #[test]
    fn test_top_rows_empty_table() {
        let infos = StockInfoTable::new();
        assert!(get_top_dividend_yield_stock(&infos).is_empty());
        assert!(get_top_potential_stock(&infos).is_empty());
    }

    #[test]
    fn test_tie_goes_to_first_row() {
        let infos = table(vec![
            row("A", Some(2.0), Some(7.0)),
            row("B", Some(2.0), Some(7.0)),
        ]);

        assert_eq!(get_top_dividend_yield_stock(&infos).rows[0].symbol, "A");
        assert_eq!(get_top_potential_stock(&infos).rows[0].symbol, "A");
    }

    #[test]
    fn test_missing_and_nan_values_ignored() {
        let infos = table(vec![
            StockInfo::missing("X"),
            row("A", Some(f64::NAN), None),
            row("B", Some(0.5), Some(1.0)),
        ]);

        assert_eq!(get_top_dividend_yield_stock(&infos).rows[0].symbol, "B");
        assert_eq!(get_top_potential_stock(&infos).rows[0].symbol, "B");

        let only_missing = table(vec![StockInfo::missing("X")]);
        assert!(get_top_dividend_yield_stock(&only_missing).is_empty());
    }

    #[test]
    fn test_ranking_does_not_mutate_input() {
        let infos = table(vec![
            row("A", Some(1.0), Some(5.0)),
            row("B", Some(3.0), Some(2.0)),
        ]);
        let before = infos.clone();

        let _ = get_top_dividend_yield_stock(&infos);
        let _ = get_top_potential_stock(&infos);

        assert_eq!(infos, before);
    }
}
