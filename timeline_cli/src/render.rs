//! Plain-text Gantt chart rendering for the terminal.

use timeline_core::{BarLayout, LaidOutRow, TimelineLayout};

/// Longest row label before truncation
const MAX_LABEL_WIDTH: usize = 32;
const MIN_CHART_WIDTH: usize = 12;

const FILLED: char = '█';
const EMPTY: char = '·';
const MARKER: char = '┆';

/// Render a layout as a text chart, `chart_width` characters wide.
pub fn render_chart(layout: &TimelineLayout, title: &str, chart_width: usize) -> String {
    let chart_width = chart_width.max(layout.axis.len()).max(MIN_CHART_WIDTH);
    let labels: Vec<String> = layout.rows.iter().map(row_label).collect();
    let label_width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(8, MAX_LABEL_WIDTH);
    let marker_cell = layout.marker_percent.map(|p| cell_index(p, chart_width));

    let mut lines = Vec::new();
    if !title.is_empty() {
        lines.push(title.to_string());
        lines.push("═".repeat(title.chars().count()));
    }

    lines.push(format!("{:<label_width$} {}", "", month_header(layout, chart_width)));

    if layout.rows.is_empty() {
        lines.push("(no items)".to_string());
    }

    for (row, label) in layout.rows.iter().zip(labels) {
        let bar = bar_cells(&row.bar, chart_width, marker_cell);
        let progress = row
            .progress
            .map(|p| format!(" {:>3.0}%", p))
            .unwrap_or_default();
        lines.push(format!("{:<label_width$} │{}│ {}{}", label, bar, row.status_label, progress));
    }

    lines.join("\n")
}

fn row_label(row: &LaidOutRow) -> String {
    let glyph = match (row.has_children, row.expanded) {
        (true, true) => '▾',
        (true, false) => '▸',
        (false, _) => ' ',
    };
    let label = format!("{}{} {}", "  ".repeat(usize::from(row.level)), glyph, row.title);
    if label.chars().count() > MAX_LABEL_WIDTH {
        let mut truncated: String = label.chars().take(MAX_LABEL_WIDTH - 1).collect();
        truncated.push('…');
        truncated
    } else {
        label
    }
}

fn cell_index(percent: f64, chart_width: usize) -> usize {
    let index = (percent / 100.0 * chart_width as f64).floor() as usize;
    index.min(chart_width - 1)
}

fn month_header(layout: &TimelineLayout, chart_width: usize) -> String {
    let mut header = vec![' '; chart_width];
    for (month, column) in layout.axis.iter().zip(&layout.columns) {
        let start = cell_index(column.left_percent, chart_width);
        // Skip labels that would run into the previous month's label
        if header[start..].iter().take(month.short_label.chars().count()).any(|c| *c != ' ') {
            continue;
        }
        for (offset, ch) in month.short_label.chars().enumerate() {
            if let Some(cell) = header.get_mut(start + offset) {
                *cell = ch;
            }
        }
    }
    // The row bars are framed by a border character
    format!(" {}", header.into_iter().collect::<String>())
}

fn bar_cells(bar: &BarLayout, chart_width: usize, marker_cell: Option<usize>) -> String {
    let step = 100.0 / chart_width as f64;
    (0..chart_width)
        .map(|i| {
            let cell_start = i as f64 * step;
            let cell_end = cell_start + step;
            let filled = bar.is_visible() && cell_start < bar.right_percent() && cell_end > bar.left_percent;
            if filled {
                FILLED
            } else if marker_cell == Some(i) {
                MARKER
            } else {
                EMPTY
            }
        })
        .collect()
}
