//! Summary of one signal pass.

use std::fmt;

use crate::domain::marker::{Marker, SignalCategory};
use crate::domain::signal::SignalRun;
use crate::domain::trend::Direction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalReport {
    pub entries_long: usize,
    pub entries_short: usize,
    pub add_ons: usize,
    pub exits_long: usize,
    pub exits_short: usize,
    /// Trend still held after the last candle.
    pub open_trend: Direction,
}

impl SignalReport {
    pub fn total(&self) -> usize {
        self.entries_long + self.entries_short + self.add_ons + self.exits_long + self.exits_short
    }
}

pub fn summarize(run: &SignalRun) -> SignalReport {
    let mut report = count_markers(&run.markers);
    report.open_trend = run.final_state.direction;
    report
}

fn count_markers(markers: &[Marker]) -> SignalReport {
    markers
        .iter()
        .fold(SignalReport::default(), |mut report, marker| {
            match marker.category {
                SignalCategory::EntryLong => report.entries_long += 1,
                SignalCategory::EntryShort => report.entries_short += 1,
                SignalCategory::AddLong => report.add_ons += 1,
                SignalCategory::ExitLong => report.exits_long += 1,
                SignalCategory::ExitShort => report.exits_short += 1,
            }
            report
        })
}

impl fmt::Display for SignalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} markers: long {}/{} (entries/exits), short {}/{}, add-ons {}, open trend: {}",
            self.total(),
            self.entries_long,
            self.exits_long,
            self.entries_short,
            self.exits_short,
            self.add_ons,
            self.open_trend
        )
    }
}
