//! Plain-text rendering of the holdings table and price charts.

use portfolio_tracker_core::models::chart::PriceChart;
use portfolio_tracker_core::models::holding::HoldingRow;
use portfolio_tracker_core::models::price::PricePoint;

pub const CHART_WIDTH: usize = 60;
pub const CHART_HEIGHT: usize = 12;

const HEADERS: [&str; 4] = ["Symbol", "Quantity", "Last price", "Total value"];
const LABEL_WIDTH: usize = 10;

pub fn format_usd(amount: f64) -> String {
    format!("{amount:.2} $")
}

pub fn format_total(total: f64) -> String {
    format!("Total: {}", format_usd(total))
}

/// Holdings table followed by the total line.
pub fn render_table(rows: &[HoldingRow], total: f64) -> String {
    let mut out = String::new();

    if rows.is_empty() {
        out.push_str("No holdings yet.\n");
        out.push_str(&format_total(total));
        out.push('\n');
        return out;
    }

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.symbol.clone(),
                r.quantity.to_string(),
                format_usd(r.last_price),
                format_usd(r.value),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    out.push_str(&format!(
        "{:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}\n",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    ));
    let rule = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"─".repeat(rule));
    out.push('\n');

    for row in &cells {
        out.push_str(&format!(
            "{:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}\n",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        ));
    }

    out.push_str(&format_total(total));
    out.push('\n');
    out
}

/// Line chart of `points` (already downsampled to the display width),
/// with the price range on the left and the date range underneath.
pub fn render_chart(chart: &PriceChart, points: &[PricePoint], height: usize) -> String {
    let height = height.max(2);
    let (from, to) = chart.range();
    let mut out = format!("{} daily close, {} to {}\n", chart.symbol, from, to);

    let span = chart.max - chart.min;
    let level = |price: f64| -> usize {
        if span <= f64::EPSILON {
            height / 2
        } else {
            let scaled = (price - chart.min) / span * (height - 1) as f64;
            (scaled.round() as usize).min(height - 1)
        }
    };

    let levels: Vec<usize> = points.iter().map(|p| level(p.price)).collect();

    for line in (0..height).rev() {
        let label = if line == height - 1 {
            format!("{:>LABEL_WIDTH$.2}", chart.max)
        } else if line == 0 {
            format!("{:>LABEL_WIDTH$.2}", chart.min)
        } else {
            " ".repeat(LABEL_WIDTH)
        };
        let plot: String = levels
            .iter()
            .map(|&l| if l == line { '*' } else { ' ' })
            .collect();
        out.push_str(&format!("{label} │{}\n", plot.trim_end()));
    }

    let width = points.len().max(1);
    out.push_str(&format!("{} └{}\n", " ".repeat(LABEL_WIDTH), "─".repeat(width)));

    let first = from.to_string();
    let last = to.to_string();
    let gap = width.saturating_sub(first.len() + last.len()).max(1);
    out.push_str(&format!(
        "{}  {first}{}{last}\n",
        " ".repeat(LABEL_WIDTH),
        " ".repeat(gap)
    ));

    out.push_str(&format!(
        "Change: {:+.2} $ ({:+.2}%)\n",
        chart.change, chart.change_pct
    ));
    out
}
