use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Row, Table};

use crate::reports::ReportTable;

/// First line to show so that `focused_line` stays inside a viewport of
/// `height` lines.
pub(crate) fn scroll_offset(focused_line: usize, height: u16) -> u16 {
    let height = usize::from(height);
    if height == 0 || focused_line < height {
        return 0;
    }
    u16::try_from(focused_line + 1 - height).unwrap_or(u16::MAX)
}

/// Build a ratatui table with evenly split columns and a bold header row.
pub(crate) fn report_table(table: &ReportTable) -> Table<'static> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(table.columns.iter().map(|column| column.to_string())).style(header_style);
    let rows = table
        .rows
        .iter()
        .map(|row| Row::new(row.iter().cloned()));
    let count = u32::try_from(table.columns.len().max(1)).unwrap_or(1);
    let widths = vec![Constraint::Ratio(1, count); table.columns.len()];
    Table::new(rows, widths).header(header).column_spacing(1)
}

/// Footer hint line: `[key] action` pairs in the shared key style.
pub(crate) fn key_hints(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (idx, (key, action)) in pairs.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        if idx + 1 == pairs.len() {
            spans.push(Span::raw(format!(" {action}")));
        } else {
            spans.push(Span::raw(format!(" {action}   ")));
        }
    }
    Line::from(spans)
}
