// ============================================================================
// Structure : PricePoint / PriceTable
// ============================================================================
// Historique de prix journalier d'un ticker sur une plage de dates
// ============================================================================

use std::fmt;

use chrono::NaiveDate;

/// Prix de clôture d'une journée
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self { date, close, volume }
    }
}

/// Historique de prix d'un ticker, trié par date croissante
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceTable {
    /// Construit le tableau en triant les points par date
    pub fn with_points(symbol: String, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { symbol, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for PriceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.points.is_empty() {
            return write!(f, "Empty PriceTable ({})", self.symbol);
        }

        write!(f, "{:<12} {:>12} {:>12}", "date", "close", "volume")?;
        for point in &self.points {
            write!(
                f,
                "\n{:<12} {:>12.2} {:>12}",
                point.date.format("%Y-%m-%d").to_string(),
                point.close,
                point.volume
            )?;
        }
        Ok(())
    }
}
