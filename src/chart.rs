use chrono::{Duration, NaiveDate};
use plotters::coord::types::RangedDate;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::compare::{ComparisonRow, ComparisonTable};
use crate::config::ChartConfig;
use crate::error::CompareError;

const COLOURS: &[RGBColor] = &[RGBColor(0x1F, 0x77, 0xB4), RGBColor(0xFF, 0x7F, 0x0E)];

/// X range covering every row and a Y ceiling with some headroom.
///
/// A single day is widened to two so the axis is not degenerate.
pub fn axis_bounds(table: &ComparisonTable) -> Option<(Range<NaiveDate>, u64)> {
    let (first, last) = table.date_bounds()?;
    let end = if last > first {
        last
    } else {
        first + Duration::days(1)
    };
    let max = table.max_views().max(1);
    let ceiling = max + (max / 10).max(1);
    Some((first..end, ceiling))
}

pub fn chart_caption(table: &ComparisonTable) -> String {
    format!(
        "Wikipedia Interest: {} vs {}",
        table.first_title, table.second_title
    )
}

fn draw_chart(
    table: &ComparisonTable,
    path: &Path,
    size: &ChartConfig,
    dates: Range<NaiveDate>,
    y_max: u64,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(chart_caption(table), ("sans-serif", 28))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(RangedDate::from(dates), 0u64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Daily Page Views")
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
        .draw()?;

    let columns: [(&str, fn(&ComparisonRow) -> u64); 2] = [
        (table.first_title.as_str(), |row| row.first),
        (table.second_title.as_str(), |row| row.second),
    ];
    for (index, (label, column)) in columns.into_iter().enumerate() {
        let colour = COLOURS[index % COLOURS.len()];
        let series = table.rows.iter().map(|row| (row.date, column(row)));
        chart
            .draw_series(LineSeries::new(series, colour.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.filled())
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Draws both columns as lines into a PNG at `path`, replacing any previous file.
///
/// Returns `Ok(false)` without touching `path` when the table has no rows.
pub fn render_chart(
    table: &ComparisonTable,
    path: &Path,
    size: &ChartConfig,
) -> Result<bool, CompareError> {
    let start_time = Instant::now();
    let Some((dates, y_max)) = axis_bounds(table) else {
        return Ok(false);
    };

    draw_chart(table, path, size, dates, y_max)
        .map_err(|e| CompareError::Render(e.to_string()))?;

    info!(
        action = "complete",
        component = "chart",
        path = ?path,
        rows = table.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Chart written"
    );
    Ok(true)
}
