//! CSV directory adapter for candles, institutional flow and marker output.
//!
//! A data directory holds `<symbol>_candles.csv` and, optionally,
//! `<symbol>_flows.csv`. The flow file is either pre-aggregated
//! (`date,net,net_trust`) or per-category (`date,name,buy,sell`); the header
//! decides which.

use crate::domain::candle::Candle;
use crate::domain::error::SignalError;
use crate::domain::flow::{aggregate_trades, normalize_date, InstitutionalFlow, InstitutionalTrade};
use crate::domain::marker::Marker;
use crate::ports::flow_data_port::FlowDataPort;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CandleRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

#[derive(Debug, Deserialize)]
struct NetFlowRow {
    date: String,
    net: f64,
    net_trust: f64,
}

#[derive(Debug, Deserialize)]
struct TradeRow {
    date: String,
    name: String,
    buy: f64,
    sell: f64,
}

#[derive(Debug, Serialize)]
struct MarkerRow<'a> {
    date: String,
    position: String,
    shape: String,
    color: &'a str,
    text: &'a str,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn candles_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}_candles.csv"))
    }

    fn flows_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}_flows.csv"))
    }
}

fn read_file(path: &PathBuf, symbol: &str) -> Result<String, SignalError> {
    fs::read_to_string(path).map_err(|e| SignalError::DataSource {
        symbol: symbol.to_string(),
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

fn format_error(what: &str, line: u64, reason: impl ToString) -> SignalError {
    SignalError::DataFormat {
        what: what.to_string(),
        line: line as usize,
        reason: reason.to_string(),
    }
}

/// Parse rows of one shape, keeping those whose date falls in `[start, end]`.
fn parse_rows<T>(
    content: &str,
    what: &str,
    start: NaiveDate,
    end: NaiveDate,
    date_of: impl Fn(&T) -> &str,
) -> Result<Vec<(NaiveDate, T)>, SignalError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| format_error(what, 1, e))?
        .clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line());
            format_error(what, line, e)
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| format_error(what, line, e))?;
        let date = normalize_date(date_of(&row))
            .ok_or_else(|| format_error(what, line, format!("invalid date '{}'", date_of(&row))))?;
        if date < start || date > end {
            continue;
        }
        rows.push((date, row));
    }
    Ok(rows)
}

fn header_names(content: &str, what: &str) -> Result<Vec<String>, SignalError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = rdr.headers().map_err(|e| format_error(what, 1, e))?;
    Ok(headers.iter().map(|h| h.to_ascii_lowercase()).collect())
}

impl MarketDataPort for CsvAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Candle>, SignalError> {
        let path = self.candles_path(symbol);
        let content = read_file(&path, symbol)?;
        let rows = parse_rows(&content, "candle", start_date, end_date, |r: &CandleRow| {
            r.date.as_str()
        })?;

        let mut by_date = BTreeMap::new();
        for (date, row) in rows {
            let candle = Candle {
                date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            };
            if by_date.insert(date, candle).is_some() {
                tracing::warn!(%symbol, %date, "duplicate candle date, keeping the later row");
            }
        }

        tracing::debug!(%symbol, candles = by_date.len(), path = %path.display(), "loaded candles");
        Ok(by_date.into_values().collect())
    }
}

impl FlowDataPort for CsvAdapter {
    /// A missing flow file is not an error; the pass treats every day as neutral.
    fn fetch_flows(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<InstitutionalFlow>, SignalError> {
        let path = self.flows_path(symbol);
        if !path.exists() {
            tracing::info!(%symbol, path = %path.display(), "no flow file, using neutral flow");
            return Ok(Vec::new());
        }
        let content = read_file(&path, symbol)?;
        let headers = header_names(&content, "flow")?;
        let has = |name: &str| headers.iter().any(|h| h == name);

        let flows = if has("net") && has("net_trust") {
            parse_rows(&content, "flow", start_date, end_date, |r: &NetFlowRow| {
                r.date.as_str()
            })?
            .into_iter()
            .map(|(date, row)| InstitutionalFlow {
                date: date.format("%Y-%m-%d").to_string(),
                net: row.net,
                net_trust: row.net_trust,
            })
            .collect()
        } else if has("name") && has("buy") && has("sell") {
            let trades: Vec<InstitutionalTrade> =
                parse_rows(&content, "flow", start_date, end_date, |r: &TradeRow| {
                    r.date.as_str()
                })?
                .into_iter()
                .map(|(_, row)| InstitutionalTrade {
                    date: row.date,
                    name: row.name,
                    buy: row.buy,
                    sell: row.sell,
                })
                .collect();
            aggregate_trades(&trades)
        } else {
            return Err(format_error(
                "flow",
                1,
                "expected columns date,net,net_trust or date,name,buy,sell",
            ));
        };

        tracing::debug!(%symbol, days = flows.len(), path = %path.display(), "loaded flows");
        Ok(flows)
    }
}

/// Write markers as CSV with a `date,position,shape,color,text` header.
pub fn write_markers<W: Write>(writer: W, markers: &[Marker]) -> Result<(), SignalError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["date", "position", "shape", "color", "text"])
        .map_err(io::Error::from)?;
    for marker in markers {
        wtr.serialize(MarkerRow {
            date: marker.time.format("%Y-%m-%d").to_string(),
            position: marker.position.to_string(),
            shape: marker.shape.to_string(),
            color: marker.color,
            text: &marker.text,
        })
        .map_err(io::Error::from)?;
    }
    wtr.flush()?;
    Ok(())
}
