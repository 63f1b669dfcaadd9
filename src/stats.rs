use chrono::NaiveDate;

use crate::compare::{ComparisonRow, ComparisonTable};
use crate::title::ArticleTitle;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub title: ArticleTitle,
    pub total_views: u64,
    pub days: usize,
    pub mean_views: f64,
    /// Busiest day; the earliest one wins a tie.
    pub peak: Option<(NaiveDate, u64)>,
}

fn summarize_column(
    title: &ArticleTitle,
    table: &ComparisonTable,
    column: impl Fn(&ComparisonRow) -> u64,
) -> SeriesSummary {
    let mut total_views = 0u64;
    let mut peak: Option<(NaiveDate, u64)> = None;

    for row in &table.rows {
        let views = column(row);
        total_views += views;
        if peak.map_or(true, |(_, best)| views > best) {
            peak = Some((row.date, views));
        }
    }

    let days = table.rows.len();
    let mean_views = if days == 0 {
        0.0
    } else {
        total_views as f64 / days as f64
    };

    SeriesSummary {
        title: title.clone(),
        total_views,
        days,
        mean_views,
        peak,
    }
}

pub fn summarize(table: &ComparisonTable) -> (SeriesSummary, SeriesSummary) {
    (
        summarize_column(&table.first_title, table, |row| row.first),
        summarize_column(&table.second_title, table, |row| row.second),
    )
}
