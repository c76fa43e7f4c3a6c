use crate::domain::{count_left, footer_text, format_spent_time, ItemStatus, Project, Task};
use crate::persistence::settings::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::ui::styles::{
    border_style, default_style, header_style, hint_style, status_style, title_style,
};
use anyhow::Result;
use chrono::{DateTime, Local};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    text::Span,
    widgets::{
        block::{Position, Title},
        Block, Borders, Cell, Row, Table, Widget,
    },
    Terminal, TerminalOptions, Viewport,
};
use std::io::{self, IsTerminal};

/// Width used when stdout is not a terminal
const FALLBACK_WIDTH: u16 = 120;

/// One table cell before layout
struct Column {
    text: String,
    status: Option<ItemStatus>,
}

impl Column {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: None,
        }
    }

    fn status(status: ItemStatus) -> Self {
        Self {
            text: status.label().to_string(),
            status: Some(status),
        }
    }
}

/// A bordered table of projects or tasks with a "Left ..." footer
pub struct Listing {
    title: String,
    header: &'static [&'static str],
    rows: Vec<Vec<Column>>,
    footer: String,
}

const PROJECT_HEADER: &[&str] = &[
    "ID",
    "Name",
    "Status",
    "Create Date",
    "Total Spent Time",
    "Total Tasks",
];
const TASK_HEADER: &[&str] = &[
    "ID",
    "Name",
    "Status",
    "Create Date",
    "Update Date",
    "Total Spent Time",
];

/// Index of the column that absorbs spare width
const NAME_COLUMN: usize = 1;

/// A hand-edited settings file may hold a format chrono cannot render
fn format_date(date: &DateTime<Local>, date_format: &str) -> String {
    if is_valid_date_format(date_format) {
        date.format(date_format).to_string()
    } else {
        date.format(DEFAULT_DATE_FORMAT).to_string()
    }
}

/// `shown` is the filtered slice, `total` the size of the whole collection
pub fn project_listing(shown: &[Project], total: usize, date_format: &str) -> Listing {
    let rows = shown
        .iter()
        .map(|project| {
            vec![
                Column::text(project.id.to_string()),
                Column::text(project.name.clone()),
                Column::status(project.status),
                Column::text(format_date(&project.created_at, date_format)),
                Column::text(format_spent_time(project.total_spent_time)),
                Column::text(project.task_count.to_string()),
            ]
        })
        .collect();

    Listing {
        title: "Projects".to_string(),
        header: PROJECT_HEADER,
        rows,
        footer: footer_text("projects", count_left(shown), total),
    }
}

pub fn task_listing(
    project_name: &str,
    shown: &[Task],
    total: usize,
    date_format: &str,
) -> Listing {
    let rows = shown
        .iter()
        .map(|task| {
            vec![
                Column::text(task.id.to_string()),
                Column::text(task.name.clone()),
                Column::status(task.status),
                Column::text(format_date(&task.created_at, date_format)),
                Column::text(format_date(&task.updated_at, date_format)),
                Column::text(format_spent_time(task.total_spent_time)),
            ]
        })
        .collect();

    let title = if project_name.is_empty() {
        "Tasks".to_string()
    } else {
        format!("Tasks of {}", project_name)
    };

    Listing {
        title,
        header: TASK_HEADER,
        rows,
        footer: footer_text("tasks", count_left(shown), total),
    }
}

impl Listing {
    /// Borders, header and one line per row
    pub fn height(&self) -> u16 {
        u16::try_from(self.rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(3)
    }

    #[cfg(test)]
    pub fn footer(&self) -> &str {
        &self.footer
    }

    fn widths(&self) -> Vec<Constraint> {
        self.header
            .iter()
            .enumerate()
            .map(|(index, title)| {
                let widest = self
                    .rows
                    .iter()
                    .map(|row| row[index].text.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(title.len());
                let widest = u16::try_from(widest).unwrap_or(u16::MAX);
                if index == NAME_COLUMN {
                    Constraint::Min(widest)
                } else {
                    Constraint::Length(widest)
                }
            })
            .collect()
    }

    fn table(&self) -> Table<'_> {
        let header =
            Row::new(self.header.iter().map(|title| Cell::from(*title))).style(header_style());

        let rows = self.rows.iter().map(|row| {
            Row::new(row.iter().map(|column| match column.status {
                Some(status) => {
                    Cell::from(Span::styled(column.text.as_str(), status_style(status)))
                }
                None => Cell::from(column.text.as_str()),
            }))
            .style(default_style())
        });

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(format!(" {} ", self.title), title_style()))
            .title(
                Title::from(Span::styled(format!(" {} ", self.footer), hint_style()))
                    .position(Position::Bottom)
                    .alignment(Alignment::Left),
            );

        Table::new(rows, self.widths())
            .header(header)
            .column_spacing(2)
            .block(block)
    }

    /// Render into a plain buffer and return its lines without trailing spaces
    pub fn lines(&self, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, self.height());
        let mut buffer = Buffer::empty(area);
        self.table().render(area, &mut buffer);
        buffer_lines(&buffer)
    }

    /// Print to stdout: an inline ratatui viewport on a terminal, plain text otherwise
    pub fn print(&self) -> Result<()> {
        let stdout = io::stdout();
        if !stdout.is_terminal() {
            for line in self.lines(FALLBACK_WIDTH) {
                println!("{}", line);
            }
            return Ok(());
        }

        let mut terminal = Terminal::with_options(
            CrosstermBackend::new(stdout),
            TerminalOptions {
                viewport: Viewport::Inline(self.height()),
            },
        )?;
        terminal.draw(|frame| frame.render_widget(self.table(), frame.size()))?;
        terminal.show_cursor()?;
        drop(terminal);
        println!();
        Ok(())
    }
}

fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer.get(x, y).symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}
