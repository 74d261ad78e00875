//! Institutional flow records and their alignment onto the candle index.
//!
//! Flow providers deliver dates in several shapes (`2024-03-05`, `2024/03/05`,
//! `2024-03-05T00:00:00`). All of them are collapsed onto the `NaiveDate` key the
//! candle series uses; a day with no record reads as neutral (zero) flow.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Category names that count toward `net_trust`.
pub const TRUST_CATEGORIES: [&str; 2] = ["Investment_Trust", "投信"];

/// One day of aggregated institutional flow as delivered by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionalFlow {
    pub date: String,
    pub net: f64,
    pub net_trust: f64,
}

/// One per-category buy/sell row before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionalTrade {
    pub date: String,
    pub name: String,
    pub buy: f64,
    pub sell: f64,
}

/// Net flow resolved for one candle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowValue {
    pub net: f64,
    pub net_trust: f64,
}

/// Collapse a provider date string to a calendar date.
///
/// Accepts `-` or `/` separators and drops any time suffix after `T` or a space.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split(['T', ' ']).next()?;
    let canonical = day.replace('/', "-");
    NaiveDate::parse_from_str(&canonical, "%Y-%m-%d").ok()
}

/// Sum per-category rows into one flow record per date, sorted by date.
pub fn aggregate_trades(rows: &[InstitutionalTrade]) -> Vec<InstitutionalFlow> {
    let mut by_date: BTreeMap<NaiveDate, FlowValue> = BTreeMap::new();
    for row in rows {
        let Some(date) = normalize_date(&row.date) else {
            tracing::warn!(date = %row.date, name = %row.name, "dropping flow row with unparseable date");
            continue;
        };
        let net = row.buy - row.sell;
        let entry = by_date.entry(date).or_default();
        entry.net += net;
        if TRUST_CATEGORIES.contains(&row.name.as_str()) {
            entry.net_trust += net;
        }
    }

    by_date
        .into_iter()
        .map(|(date, v)| InstitutionalFlow {
            date: date.format("%Y-%m-%d").to_string(),
            net: v.net,
            net_trust: v.net_trust,
        })
        .collect()
}

/// Resolves flow for a candle index and look-back offset.
#[derive(Debug, Clone)]
pub struct FlowAligner {
    dates: Vec<NaiveDate>,
    by_date: HashMap<NaiveDate, FlowValue>,
}

impl FlowAligner {
    /// Build from the candle dates and the raw flow records.
    ///
    /// Records whose date cannot be normalised are dropped. When two records
    /// normalise to the same date the later one wins.
    pub fn new(candle_dates: Vec<NaiveDate>, flows: &[InstitutionalFlow]) -> Self {
        let mut by_date = HashMap::with_capacity(flows.len());
        for flow in flows {
            match normalize_date(&flow.date) {
                Some(date) => {
                    by_date.insert(
                        date,
                        FlowValue {
                            net: flow.net,
                            net_trust: flow.net_trust,
                        },
                    );
                }
                None => {
                    tracing::warn!(date = %flow.date, "dropping flow record with unparseable date");
                }
            }
        }
        Self {
            dates: candle_dates,
            by_date,
        }
    }

    /// Flow for the candle at `index - offset`; zero flow when out of range or missing.
    pub fn lookup(&self, index: usize, offset: usize) -> FlowValue {
        index
            .checked_sub(offset)
            .and_then(|i| self.dates.get(i))
            .and_then(|date| self.by_date.get(date))
            .copied()
            .unwrap_or_default()
    }

    /// Number of candle dates that have a matching flow record.
    pub fn matched_days(&self) -> usize {
        self.dates
            .iter()
            .filter(|d| self.by_date.contains_key(d))
            .count()
    }
}
