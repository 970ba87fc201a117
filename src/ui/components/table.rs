//! Generic column-driven table

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, Table, TableState},
    Frame,
};

/// One table column: header label, width and how to render a row's cell
pub struct Column<T> {
    pub label: &'static str,
    pub width: Constraint,
    pub render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(label: &'static str, width: Constraint, render: fn(&T) -> String) -> Self {
        Self {
            label,
            width,
            render,
        }
    }
}

/// Cell text for every row, in column order
pub fn table_cells<T>(columns: &[Column<T>], rows: &[T]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| columns.iter().map(|col| (col.render)(row)).collect())
        .collect()
}

/// Render `rows` under a header built from `columns`, striping alternate rows
pub fn render_table<T>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    columns: &[Column<T>],
    rows: &[T],
    selected: Option<usize>,
) {
    let header = Row::new(columns.iter().map(|c| c.label))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let body: Vec<Row> = table_cells(columns, rows)
        .into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let style = if i % 2 == 0 {
                Style::default()
            } else {
                Style::default().bg(Color::Rgb(30, 30, 40))
            };
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let table = Table::new(body, columns.iter().map(|c| c.width))
        .header(header)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Pair {
        id: u32,
        label: &'static str,
    }

    #[test]
    fn test_table_cells_follow_column_order() {
        let columns = [
            Column::new("Label", Constraint::Fill(1), |p: &Pair| p.label.to_string()),
            Column::new("ID", Constraint::Length(4), |p: &Pair| p.id.to_string()),
        ];
        let rows = [Pair { id: 1, label: "a" }, Pair { id: 2, label: "b" }];

        assert_eq!(
            table_cells(&columns, &rows),
            vec![
                vec!["a".to_string(), "1".to_string()],
                vec!["b".to_string(), "2".to_string()],
            ]
        );
    }

    #[test]
    fn test_table_cells_empty_rows() {
        let columns = [Column::new("ID", Constraint::Length(4), |p: &Pair| {
            p.id.to_string()
        })];
        assert!(table_cells(&columns, &[]).is_empty());
    }
}
