use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::PricePoint;

/// Chart-ready view of a symbol's price history.
///
/// The core computes the numbers; the presentation layer only draws them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChart {
    /// Symbol the history belongs to
    pub symbol: String,

    /// Points to plot, ascending by date
    pub points: Vec<PricePoint>,

    /// Lowest close in the window
    pub min: f64,

    /// Highest close in the window
    pub max: f64,

    pub first: PricePoint,
    pub last: PricePoint,

    /// `last.price - first.price`
    pub change: f64,

    /// Change relative to the first close, in percent. Zero when the first
    /// close is zero.
    pub change_pct: f64,
}

impl PriceChart {
    /// Date span covered by the chart.
    #[must_use]
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.first.date, self.last.date)
    }
}
