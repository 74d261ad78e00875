//! Chart markers emitted by the signal engine.

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    ArrowUp,
    ArrowDown,
}

/// What a marker means; placement and color follow from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalCategory {
    EntryLong,
    EntryShort,
    AddLong,
    ExitLong,
    ExitShort,
}

pub const COLOR_ENTRY_LONG: &str = "#e91e63";
pub const COLOR_ENTRY_SHORT: &str = "#4caf50";
pub const COLOR_ADD_LONG: &str = "#2196F3";
pub const COLOR_EXIT: &str = "#ff9800";

impl SignalCategory {
    pub fn position(self) -> MarkerPosition {
        match self {
            SignalCategory::EntryLong | SignalCategory::AddLong | SignalCategory::ExitShort => {
                MarkerPosition::BelowBar
            }
            SignalCategory::EntryShort | SignalCategory::ExitLong => MarkerPosition::AboveBar,
        }
    }

    pub fn shape(self) -> MarkerShape {
        match self.position() {
            MarkerPosition::BelowBar => MarkerShape::ArrowUp,
            MarkerPosition::AboveBar => MarkerShape::ArrowDown,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SignalCategory::EntryLong => COLOR_ENTRY_LONG,
            SignalCategory::EntryShort => COLOR_ENTRY_SHORT,
            SignalCategory::AddLong => COLOR_ADD_LONG,
            SignalCategory::ExitLong | SignalCategory::ExitShort => COLOR_EXIT,
        }
    }

    pub fn is_exit(self) -> bool {
        matches!(self, SignalCategory::ExitLong | SignalCategory::ExitShort)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub time: NaiveDate,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub color: &'static str,
    pub text: String,
    pub category: SignalCategory,
}

impl Marker {
    pub fn new(time: NaiveDate, category: SignalCategory, text: impl Into<String>) -> Self {
        Marker {
            time,
            position: category.position(),
            shape: category.shape(),
            color: category.color(),
            text: text.into(),
            category,
        }
    }
}

impl fmt::Display for MarkerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerPosition::AboveBar => write!(f, "aboveBar"),
            MarkerPosition::BelowBar => write!(f, "belowBar"),
        }
    }
}

impl fmt::Display for MarkerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerShape::ArrowUp => write!(f, "arrowUp"),
            MarkerShape::ArrowDown => write!(f, "arrowDown"),
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalCategory::EntryLong => "entry-long",
            SignalCategory::EntryShort => "entry-short",
            SignalCategory::AddLong => "add-long",
            SignalCategory::ExitLong => "exit-long",
            SignalCategory::ExitShort => "exit-short",
        };
        f.write_str(name)
    }
}
