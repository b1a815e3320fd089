// ============================================================================
// Structure : StockInfo / StockInfoTable
// ============================================================================
// Une ligne par ticker : prix, rendement du dividende et potentiel.
//
// CONCEPTS RUST :
// 1. Option<f64> : une valeur manquante (fetch échoué) reste None,
//    affichée "NaN" comme le ferait un dataframe
// 2. impl Display : le tableau s'imprime directement avec println!("{}")
// ============================================================================

use std::fmt;

/// Informations boursières d'un ticker
#[derive(Debug, Clone, PartialEq)]
pub struct StockInfo {
    /// Symbole du ticker (ex: "MC.PA")
    pub symbol: String,

    /// Nom de la société (ex: "LVMH Moët Hennessy Louis Vuitton")
    pub name: Option<String>,

    /// Devise de cotation (ex: "EUR")
    pub currency: Option<String>,

    /// Dernier prix connu
    pub price: Option<f64>,

    /// Rendement du dividende sur un an, en pourcentage
    pub dividend_yield: Option<f64>,

    /// Potentiel : hausse nécessaire pour retrouver le plus haut sur un an,
    /// en pourcentage
    pub potential: Option<f64>,
}

impl StockInfo {
    /// Crée une ligne avec uniquement le symbole
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            name: None,
            currency: None,
            price: None,
            dividend_yield: None,
            potential: None,
        }
    }

    /// Ligne vide utilisée quand le fetch d'un ticker échoue
    pub fn missing(symbol: &str) -> Self {
        Self::new(symbol.to_string())
    }

    /// Vrai si aucune donnée n'a pu être chargée
    pub fn is_missing(&self) -> bool {
        self.price.is_none() && self.dividend_yield.is_none() && self.potential.is_none()
    }
}

/// Tableau de StockInfo, dans l'ordre des tickers d'entrée
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockInfoTable {
    pub rows: Vec<StockInfo>,
}

impl StockInfoTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn push(&mut self, row: StockInfo) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StockInfo> {
        self.rows.iter()
    }
}

impl From<Vec<StockInfo>> for StockInfoTable {
    fn from(rows: Vec<StockInfo>) -> Self {
        Self { rows }
    }
}

impl FromIterator<StockInfo> for StockInfoTable {
    fn from_iter<I: IntoIterator<Item = StockInfo>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Formate une valeur optionnelle, "NaN" si absente
fn fmt_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "NaN".to_string(),
    }
}

/// Tronque le nom à 28 caractères avec ellipse si nécessaire
fn truncate_name(name: Option<&str>) -> String {
    let name = name.unwrap_or("-");
    if name.chars().count() <= 28 {
        name.to_string()
    } else {
        let truncated: String = name.chars().take(27).collect();
        format!("{}…", truncated)
    }
}

impl fmt::Display for StockInfoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "Empty StockInfoTable");
        }

        write!(
            f,
            "{:<10} {:<28} {:>4} {:>12} {:>15} {:>12}",
            "ticker", "name", "cur", "price", "dividendYield", "potential"
        )?;

        for row in &self.rows {
            write!(
                f,
                "\n{:<10} {:<28} {:>4} {:>12} {:>15} {:>12}",
                row.symbol,
                truncate_name(row.name.as_deref()),
                row.currency.as_deref().unwrap_or("-"),
                fmt_number(row.price),
                fmt_number(row.dividend_yield),
                fmt_number(row.potential),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, price: f64, dividend_yield: f64, potential: f64) -> StockInfo {
        StockInfo {
            symbol: symbol.to_string(),
            name: Some(format!("{} SA", symbol)),
            currency: Some("EUR".to_string()),
            price: Some(price),
            dividend_yield: Some(dividend_yield),
            potential: Some(potential),
        }
    }

    #[test]
    fn test_missing_row() {
        let info = StockInfo::missing("XX.PA");
        assert_eq!(info.symbol, "XX.PA");
        assert!(info.is_missing());
        assert!(!row("AI.PA", 170.0, 1.8, 4.2).is_missing());
    }

    #[test]
    fn test_display_table() {
        let table: StockInfoTable = vec![row("AI.PA", 170.0, 1.8, 4.2), StockInfo::missing("XX.PA")]
            .into_iter()
            .collect();

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("dividendYield"));
        assert!(lines[1].starts_with("AI.PA"));
        assert!(lines[1].contains("170.00"));
        assert!(lines[1].contains("1.80"));
        assert!(lines[2].starts_with("XX.PA"));
        assert!(lines[2].contains("NaN"));
    }

    #[test]
    fn test_display_empty_table() {
        assert_eq!(StockInfoTable::new().to_string(), "Empty StockInfoTable");
    }

    #[test]
    fn test_long_name_truncated() {
        let name = "Compagnie Générale des Établissements Michelin";
        let truncated = truncate_name(Some(name));
        assert_eq!(truncated.chars().count(), 28);
        assert!(truncated.ends_with('…'));
    }
}
