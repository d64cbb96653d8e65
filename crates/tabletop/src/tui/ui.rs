//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::App;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Board and rules
            Constraint::Length(8), // Log
            Constraint::Length(3), // Input
        ])
        .split(area);

    let title = Paragraph::new(format!("Tabletop - {}", app.kind().title()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    draw_board(frame, middle[0], app);
    draw_info(frame, middle[1], app);
    draw_log(frame, chunks[2], app);
    draw_input(frame, chunks[3], app);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title("Board").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = app
        .board()
        .lines()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let height = app.board().lines().count() as u16;
    let board_area = center_rect(inner, width.min(inner.width), height.min(inner.height));

    let lines: Vec<Line> = app
        .board()
        .lines()
        .map(|l| Line::from(styled_row(l)))
        .collect();
    frame.render_widget(Paragraph::new(lines), board_area);
}

fn styled_row(row: &str) -> Vec<Span<'static>> {
    row.chars()
        .map(|c| {
            let style = match c {
                'X' => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                'O' => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                '#' => Style::default().fg(Color::DarkGray),
                _ => Style::default(),
            };
            Span::styled(c.to_string(), style)
        })
        .collect()
}

fn draw_info(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(5)])
        .split(area);

    let rules = Paragraph::new(app.kind().rules())
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Rules").borders(Borders::ALL));
    frame.render_widget(rules, sections[0]);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Status").borders(Borders::ALL));
    frame.render_widget(status, sections[1]);
}

fn draw_log(frame: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.log().len().saturating_sub(visible);
    let lines: Vec<Line> = app.log()[start..]
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    let log = Paragraph::new(lines).block(Block::default().title("Log").borders(Borders::ALL));
    frame.render_widget(log, area);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App) {
    let (title, style) = if app.is_over() {
        ("r: restart  q: quit", Style::default().fg(Color::DarkGray))
    } else if app.awaiting_human() {
        ("Your move (Enter to submit, Esc to quit)", Style::default())
    } else {
        ("Waiting (Esc to quit)", Style::default().fg(Color::DarkGray))
    };
    let input = Paragraph::new(format!("> {}", app.input()))
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::GameEvent;
    use ratatui::{Terminal, backend::TestBackend};
    use tabletop_core::GameKind;

    #[test]
    fn test_draw_shows_board_and_rules() {
        let mut app = App::new(GameKind::Pyramid);
        app.handle_event(GameEvent::BoardChanged("  X  \n O . ".to_string()));
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Pyramid Tic-Tac-Toe"));
        assert!(text.contains("Rules"));
        assert!(text.contains("X"));
    }

    #[test]
    fn test_center_rect_fits_inside() {
        let area = Rect::new(0, 0, 40, 20);
        let centered = center_rect(area, 10, 4);
        assert_eq!((centered.x, centered.y, centered.width, centered.height), (15, 8, 10, 4));
    }
}
