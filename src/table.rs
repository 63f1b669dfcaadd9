use std::fs;
use std::path::Path;

use crate::compare::ComparisonTable;
use crate::dates::format_display_date;
use crate::stats::SeriesSummary;
use crate::utils::format_number;

fn cells(table: &ComparisonTable) -> Vec<[String; 3]> {
    table
        .rows
        .iter()
        .map(|row| {
            [
                format_display_date(row.date),
                row.first.to_string(),
                row.second.to_string(),
            ]
        })
        .collect()
}

/// Plain-text table with the date left aligned and counts right aligned.
pub fn render_text(table: &ComparisonTable) -> String {
    let headers = table.headers();
    let body = cells(table);

    let mut widths = headers.map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| {
        format!(
            "{:<w0$}  {:>w1$}  {:>w2$}\n",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        )
    };

    let mut out = line(headers);
    out.push_str(&format!(
        "{}  {}  {}\n",
        "-".repeat(widths[0]),
        "-".repeat(widths[1]),
        "-".repeat(widths[2])
    ));
    for row in &body {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(table: &ComparisonTable) -> String {
    let mut out = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr style=\"text-align: right;\">\n");
    for header in table.headers() {
        out.push_str(&format!("      <th>{}</th>\n", escape_html(header)));
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in cells(table) {
        out.push_str("    <tr>\n");
        for cell in row {
            out.push_str(&format!("      <td>{}</td>\n", cell));
        }
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");
    out
}

pub fn write_html(table: &ComparisonTable, path: &Path) -> std::io::Result<()> {
    fs::write(path, render_html(table))
}

/// One line per title: total, days covered, daily mean and peak day.
pub fn summary_line(summary: &SeriesSummary) -> String {
    let peak = match summary.peak {
        Some((date, views)) => format!(
            ", peak {} on {}",
            format_number(views),
            format_display_date(date)
        ),
        None => String::new(),
    };
    format!(
        "- {}: {} views over {} days, {:.1}/day{}",
        summary.title,
        format_number(summary.total_views),
        format_number(summary.days as u64),
        summary.mean_views,
        peak
    )
}

pub fn print_comparison_results(
    table: &ComparisonTable,
    summaries: &(SeriesSummary, SeriesSummary),
    chart_path: Option<&Path>,
) {
    println!(
        "\n--- Wikipedia Interest: {} vs {} ---",
        table.first_title, table.second_title
    );

    if let Some((first, last)) = table.date_bounds() {
        println!(
            "Date range: {} to {} ({} days with data)",
            format_display_date(first),
            format_display_date(last),
            format_number(table.len() as u64)
        );
    } else {
        println!("No pageview data for the requested range");
    }

    println!();
    print!("{}", render_text(table));

    for summary in [&summaries.0, &summaries.1] {
        println!("{}", summary_line(summary));
    }

    if let Some(path) = chart_path {
        println!("\nChart written to {}", path.display());
    }
}
