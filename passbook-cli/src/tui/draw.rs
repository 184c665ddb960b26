//! Rendering of the terminal form.

use super::app::{App, AppMode, Focus};
use passbook_core::{Clipboard, FormField, FormMode, NoticeLevel};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

const WEBSITE_COLUMN_WIDTH: usize = 36;
const ACTIONS_HINT: &str = concat!(
    " ^S save | ^U update | ^D delete | ^Y copy password | ^G generate |",
    " ^F search | ^R show all | ^N new | Tab focus | Esc quit ",
);

pub fn draw_ui<C: Clipboard>(f: &mut Frame<'_>, app: &mut App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Form fields
            Constraint::Length(1), // Actions
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Records
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let mode = match app.controller.form().mode() {
        FormMode::New => "new record".to_string(),
        FormMode::Editing(id) => format!("editing #{}", id),
    };
    let header = Paragraph::new(format!(
        " Passbook | {} records | {} ",
        app.controller.records().len(),
        mode
    ))
    .style(
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    draw_form(f, app, chunks[1]);

    let actions = Paragraph::new(ACTIONS_HINT).style(Style::default().fg(Color::Gray));
    f.render_widget(actions, chunks[2]);

    let search_title = match app.controller.search_term() {
        Some(term) => format!(" Search (showing results for {:?}) ", term),
        None => " Search (Enter to run) ".to_string(),
    };
    let search = Paragraph::new(app.search_input.as_str())
        .block(focus_block(search_title, app.focus == Focus::Search));
    f.render_widget(search, chunks[3]);
    if app.focus == Focus::Search {
        set_cursor(f, chunks[3], app.search_input.chars().count());
    }

    draw_records(f, app, chunks[4]);

    let status_bar = Paragraph::new(format!(" {} ", app.status))
        .style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(status_bar, chunks[5]);

    if let Some((notice, _)) = &app.toast {
        let background = match notice.level {
            NoticeLevel::Error => Color::Red,
            NoticeLevel::Success | NoticeLevel::Info => Color::Green,
        };
        let area = centered_rect(50, 3, f.area());
        let toast = Paragraph::new(notice.message.as_str())
            .style(Style::default().fg(Color::White).bg(background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", notice.title())),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(toast, area);
    }

    if let AppMode::ConfirmDelete(id) = app.mode {
        let area = centered_rect(50, 5, f.area());
        let dialog = Paragraph::new(vec![
            Line::from(format!("Delete record #{}?", id)),
            Line::from(""),
            Line::from(Span::styled(
                "y = delete, n / Esc = keep",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Delete ")
                .border_style(Style::default().fg(Color::Red)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn draw_form<C: Clipboard>(f: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(area);

    let form = app.controller.form();
    for (field, column) in FormField::ALL.into_iter().zip(columns.iter()) {
        let value = form.field(field);
        let shown = match field {
            FormField::Password => "*".repeat(value.chars().count()),
            _ => value.to_string(),
        };
        let focused = app.focus == Focus::Field(field);
        let title = format!(" {} ", field.label());
        let input = Paragraph::new(shown).block(focus_block(title, focused));
        f.render_widget(input, *column);

        if focused {
            set_cursor(f, *column, value.chars().count());
        }
    }
}

fn draw_records<C: Clipboard>(f: &mut Frame<'_>, app: &mut App<C>, area: Rect) {
    // id and password stay hidden; selecting a row copies them into the form
    let items: Vec<ListItem<'_>> = app
        .controller
        .records()
        .iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{:<width$} ",
                    truncate_str(&record.website, WEBSITE_COLUMN_WIDTH),
                    width = WEBSITE_COLUMN_WIDTH
                )),
                Span::raw(record.username.clone()),
            ]))
        })
        .collect();

    let title = format!(
        " {:<width$} Username ",
        "Website",
        width = WEBSITE_COLUMN_WIDTH
    );
    let list = List::new(items)
        .block(focus_block(title, app.focus == Focus::List))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn focus_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border)
}

fn set_cursor(f: &mut Frame<'_>, area: Rect, text_len: usize) {
    let max_x = area.x + area.width.saturating_sub(2);
    let x = (area.x + 1).saturating_add(text_len as u16).min(max_x);
    f.set_cursor_position((x, area.y + 1));
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    }
}

fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
