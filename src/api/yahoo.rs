// ============================================================================
// API Client : Yahoo Finance
// ============================================================================
// Récupère prix et dividendes depuis l'endpoint "chart" de Yahoo Finance
//
// CONCEPTS RUST :
// 1. async/await : appels HTTP non-bloquants avec reqwest
// 2. Serde : désérialisation JSON automatique vers des structs privées
// 3. anyhow : erreurs enrichies de contexte (.context, bail!)
// ============================================================================

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::api::QuoteProvider;
use crate::models::{PricePoint, StockInfo};

/// URL de base de l'API Yahoo Finance
pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

// ============================================================================
// Structures pour parser la réponse JSON de Yahoo Finance
// ============================================================================
// Yahoo retourne un JSON complexe, on définit des structures qui matchent
// la partie utile pour que serde puisse désérialiser automatiquement
// ============================================================================

/// Réponse complète de l'API Yahoo Finance
#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    /// null quand Yahoo renvoie une erreur (ticker inconnu, etc.)
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
    timestamp: Option<Vec<i64>>,
    events: Option<Events>,
    indicators: Indicators,
}

/// Métadonnées du ticker
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    symbol: String,
    currency: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    /// Décalage en secondes entre l'heure de la place de cotation et UTC
    gmtoffset: Option<i64>,
}

/// Événements (dividendes) présents si la requête contient events=div
#[derive(Debug, Deserialize)]
struct Events {
    /// Clé : timestamp Unix sous forme de chaîne
    #[serde(default)]
    dividends: HashMap<String, Dividend>,
}

#[derive(Debug, Deserialize)]
struct Dividend {
    amount: f64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    high: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

// ============================================================================
// Client
// ============================================================================

/// Client HTTP pour Yahoo Finance
///
/// Le client reqwest est créé une seule fois et réutilisé pour tous les
/// tickers (pool de connexions).
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    /// Crée un client pointant sur l'API publique de Yahoo
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO_BASE_URL)
    }

    /// Crée un client avec une URL de base différente
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        // User-Agent de navigateur pour éviter le blocage par Yahoo
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(Duration::from_secs(30))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Envoie la requête et retourne le premier résultat du chart
    async fn get_chart(&self, url: &str) -> Result<ChartResult> {
        debug!(url = %url, "Sending HTTP request to Yahoo Finance");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Échec de la requête HTTP vers Yahoo Finance")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // Yahoo renvoie aussi un JSON d'erreur avec un 404, on tente de le lire
        // pour avoir un message plus précis
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(yahoo_response) = serde_json::from_str::<YahooResponse>(&body) {
                if yahoo_response.chart.error.is_some() {
                    return first_result(yahoo_response);
                }
            }
            error!(status = %status, "Yahoo Finance returned error status");
            anyhow::bail!("Yahoo Finance a retourné une erreur : HTTP {}", status);
        }

        let yahoo_response: YahooResponse = response
            .json()
            .await
            .context("Échec du parsing JSON de la réponse Yahoo")?;

        first_result(yahoo_response)
    }
}

impl QuoteProvider for YahooClient {
    #[instrument(skip(self))]
    async fn fetch_stock_info(&self, symbol: &str) -> Result<StockInfo> {
        let url = build_info_url(&self.base_url, symbol);
        let result = self.get_chart(&url).await?;
        let info = parse_stock_info(result, symbol);

        info!(
            price = ?info.price,
            dividend_yield = ?info.dividend_yield,
            potential = ?info.potential,
            "Fetched stock info"
        );
        Ok(info)
    }

    #[instrument(skip(self))]
    async fn fetch_price_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        let url = build_history_url(&self.base_url, symbol, start, end);
        let result = self.get_chart(&url).await?;
        let points = parse_price_history(result, start, end)?;

        info!(points = points.len(), "Fetched price history");
        Ok(points)
    }
}

// ============================================================================
// Construction des URLs
// ============================================================================

/// URL pour un an de données journalières avec les dividendes
fn build_info_url(base_url: &str, symbol: &str) -> String {
    format!(
        "{}/v8/finance/chart/{}?range=1y&interval=1d&events=div",
        base_url, symbol
    )
}

/// URL pour un historique journalier entre deux dates incluses
///
/// La fenêtre est élargie d'un jour de chaque côté : les dates sont celles
/// de la place de cotation, qui peut être décalée par rapport à UTC. Le
/// filtrage exact se fait dans parse_price_history.
fn build_history_url(base_url: &str, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
    let start = start.checked_sub_days(Days::new(1)).unwrap_or(start);
    let end = end.checked_add_days(Days::new(1)).unwrap_or(end);

    let period1 = start.and_hms_opt(0, 0, 0).map(|d| d.and_utc().timestamp()).unwrap_or(0);
    let period2 = end
        .and_hms_opt(23, 59, 59)
        .map(|d| d.and_utc().timestamp())
        .unwrap_or(period1);

    format!(
        "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}",
        base_url, symbol, period1, period2
    )
}

// ============================================================================
// Parsing
// ============================================================================

/// Extrait le premier résultat, ou l'erreur renvoyée par Yahoo
fn first_result(yahoo_response: YahooResponse) -> Result<ChartResult> {
    if let Some(err) = yahoo_response.chart.error {
        anyhow::bail!(
            "Yahoo Finance : {} ({})",
            err.code,
            err.description.unwrap_or_default()
        );
    }

    yahoo_response
        .chart
        .result
        .into_iter()
        .flatten()
        .next()
        .context("Aucune donnée retournée par Yahoo Finance")
}

/// Calcule prix, rendement et potentiel à partir d'un an de données
///
/// - prix : regularMarketPrice, sinon dernière clôture connue
/// - rendement : somme des dividendes de la période / prix * 100
/// - potentiel : (plus haut de la période - prix) / prix * 100
fn parse_stock_info(result: ChartResult, symbol: &str) -> StockInfo {
    let ChartResult {
        meta,
        events,
        indicators,
        ..
    } = result;

    if meta.symbol != symbol {
        debug!(requested = %symbol, returned = %meta.symbol, "Yahoo returned a different symbol");
    }

    let quote = indicators.quote.into_iter().next();
    let (highs, closes) = match quote {
        Some(q) => (q.high.unwrap_or_default(), q.close.unwrap_or_default()),
        None => (Vec::new(), Vec::new()),
    };

    let last_close = closes.iter().rev().find_map(|&c| c);
    let price = meta
        .regular_market_price
        .or(last_close)
        .filter(|p| p.is_finite() && *p > 0.0);

    let mut info = StockInfo::new(symbol.to_string());
    info.name = meta.long_name.or(meta.short_name);
    info.currency = meta.currency;
    info.price = price;

    let Some(price) = price else {
        warn!(ticker = %symbol, "No usable price in Yahoo response");
        return info;
    };

    let dividends: f64 = events
        .map(|e| e.dividends.values().map(|d| d.amount).sum())
        .unwrap_or(0.0);
    info.dividend_yield = Some(dividends / price * 100.0);

    let year_high = highs.iter().filter_map(|&h| h).fold(None, |acc: Option<f64>, h| {
        Some(acc.map_or(h, |a| a.max(h)))
    });
    // Un prix au-dessus du plus haut signifie qu'il n'y a plus de marge
    info.potential = year_high.map(|high| ((high - price) / price * 100.0).max(0.0));

    info
}

/// Convertit la réponse en points journaliers compris dans [start, end]
///
/// Chaque séance est datée à l'heure locale de la place (meta.gmtoffset),
/// UTC si Yahoo ne fournit pas le décalage.
fn parse_price_history(
    result: ChartResult,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<PricePoint>> {
    let gmtoffset = result.meta.gmtoffset.unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();
    debug!(timestamp_count = timestamps.len(), gmtoffset, "Received timestamps from Yahoo");

    let (closes, volumes) = match result.indicators.quote.into_iter().next() {
        Some(q) => (q.close.unwrap_or_default(), q.volume.unwrap_or_default()),
        None => (Vec::new(), Vec::new()),
    };

    let mut points = Vec::with_capacity(timestamps.len());
    let mut skipped_count = 0;

    for (i, &timestamp) in timestamps.iter().enumerate() {
        let close = match closes.get(i).and_then(|&v| v) {
            Some(v) => v,
            None => {
                skipped_count += 1;
                continue;
            }
        };
        let volume = volumes.get(i).and_then(|&v| v).unwrap_or(0);

        let date = DateTime::from_timestamp(timestamp + gmtoffset, 0)
            .context("Timestamp invalide")?
            .date_naive();

        if date < start || date > end {
            continue;
        }

        points.push(PricePoint::new(date, close, volume));
    }

    if skipped_count > 0 {
        warn!(
            skipped = skipped_count,
            total = timestamps.len(),
            "Skipped price points with missing close"
        );
    }

    Ok(points)
}

// ============================================================================
// Tests unitaires
// ============================================================================
