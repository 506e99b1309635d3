use crate::stock::insider::IssuerAggregate;
use crate::{Error, Result};
use plotters::prelude::*;
use plotters::style::register_font;
use std::path::Path;
use tracing::{debug, error, info};

/// Issuers drawn on the chart.
pub const TOP_ISSUERS: usize = 15;

const TITLE: &str = "Insider Transactions - Last 24h (count per issuer)";

// 10 x 6 inches at 160 dpi
const SIZE: (u32, u32) = (1600, 960);
const MARGIN: u32 = 40;
const BAR_GAP: u32 = 12;

// DejaVu Sans, see assets/DejaVuSans.LICENSE
static FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Draw the transaction count of the busiest issuers as a PNG bar chart.
///
/// Nothing is written for an empty `issuers`, which returns `Ok(false)`. Bars run left to right
/// in the order given, each labelled with its issuer symbol.
pub fn save_chart(issuers: &[IssuerAggregate], path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if issuers.is_empty() {
        debug!("no issuers to chart; skipping {}", path.display());
        return Ok(false);
    }

    let top = &issuers[..issuers.len().min(TOP_ISSUERS)];
    draw_bars(top, path).map_err(|err| {
        error!("failed to draw chart at {}, error({err})", path.display());
        Error::Chart(err.to_string())
    })?;

    for (rank, issuer) in top.iter().enumerate() {
        info!(
            "chart bar {}: [{}] {} transactions",
            rank + 1,
            issuer.issuer_symbol,
            issuer.n_transactions
        );
    }
    info!("chart saved to {}", path.display());
    Ok(true)
}

fn draw_bars(
    top: &[IssuerAggregate],
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    register_font("sans-serif", FontStyle::Normal, FONT)
        .map_err(|_| "bundled chart font is not a valid font file")?;

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let bars = top.len() as u32;
    let highest = top
        .iter()
        .map(|issuer| issuer.n_transactions)
        .max()
        .unwrap_or(0)
        .max(1);
    let ceiling = highest + highest / 10 + 1;

    // a single-value range collapses to a point, so keep at least two segments
    let last = bars.max(2) - 1;
    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 36))
        .margin(MARGIN)
        .x_label_area_size(90)
        .y_label_area_size(80)
        .build_cartesian_2d((0..last).into_segmented(), 0..ceiling)?;

    let symbol = |x: &SegmentValue<u32>| match x {
        SegmentValue::CenterOf(i) => top
            .get(*i as usize)
            .map(|issuer| issuer.issuer_symbol.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(RGBColor(235, 235, 235))
        .x_labels(top.len())
        .x_label_formatter(&symbol)
        .x_desc("Issuer Symbol")
        .y_desc("Number of Transactions")
        .label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 26))
        .draw()?;

    chart.draw_series(top.iter().enumerate().map(|(i, issuer)| {
        let x = i as u32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(x), 0),
                (SegmentValue::Exact(x + 1), issuer.n_transactions),
            ],
            BLUE.filled(),
        );
        bar.set_margin(0, 0, BAR_GAP, BAR_GAP);
        bar
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(symbol: &str, n_transactions: u64) -> IssuerAggregate {
        IssuerAggregate {
            issuer_symbol: symbol.to_string(),
            n_transactions,
            total_shares: n_transactions as f64 * 100.0,
            buys: 0.0,
            sells: n_transactions as f64 * 100.0,
        }
    }

    #[test]
    fn empty_chart_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        assert!(!save_chart(&[], &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn labelled_chart_is_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let issuers: Vec<_> = (0..20)
            .map(|i| issuer(&format!("SYM{i}"), 40 - i))
            .collect();

        let path = dir.path().join("chart.png");
        assert!(save_chart(&issuers, &path).unwrap());
        let png = std::fs::read(&path).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let single = dir.path().join("single.png");
        assert!(save_chart(&issuers[..1], &single).unwrap());
        assert!(std::fs::metadata(&single).unwrap().len() > 0);
    }
}
