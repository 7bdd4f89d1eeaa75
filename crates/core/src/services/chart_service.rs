use crate::models::chart::PriceChart;
use crate::models::price::{PricePoint, PriceSeries};

/// Turns a price history into chart-ready data.
///
/// The core computes the numbers; the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build a chart from a series. `None` for an empty series.
    pub fn build_chart(&self, series: &PriceSeries) -> Option<PriceChart> {
        let first = series.first()?.clone();
        let last = series.last()?.clone();

        let (min, max) = series
            .prices()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            });

        let change = last.price - first.price;
        let change_pct = if first.price.abs() > f64::EPSILON {
            change / first.price * 100.0
        } else {
            0.0
        };

        Some(PriceChart {
            symbol: series.symbol.clone(),
            points: series.points().to_vec(),
            min,
            max,
            first,
            last,
            change,
            change_pct,
        })
    }

    /// Reduce `points` to at most `width` buckets by averaging neighbours,
    /// keeping the first date of each bucket. Shorter inputs are returned
    /// unchanged.
    pub fn downsample(&self, points: &[PricePoint], width: usize) -> Vec<PricePoint> {
        if width == 0 {
            return Vec::new();
        }
        if points.len() <= width {
            return points.to_vec();
        }

        (0..width)
            .filter_map(|bucket| {
                let start = bucket * points.len() / width;
                let end = ((bucket + 1) * points.len() / width).max(start + 1);
                let slice = points.get(start..end.min(points.len()))?;
                let first = slice.first()?;
                let avg = slice.iter().map(|p| p.price).sum::<f64>() / slice.len() as f64;
                Some(PricePoint::new(first.date, avg))
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
