use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::panel;
use crate::app::{App, PaneSide};
use crate::core::BufferMode;
use crate::fs::FilesystemPort;

/// Number of buffered names shown before collapsing into "+N more".
const BUFFER_PREVIEW: usize = 5;

/// Draws the whole frame and records the pane viewport height back on the
/// app, so the selection arithmetic matches what is actually on screen.
pub fn draw<F: FilesystemPort>(frame: &mut Frame, app: &mut App<F>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(4),    // panes
            Constraint::Length(3), // buffer bar
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    // Inner height minus the per-pane status row.
    let viewport = panes[0].height.saturating_sub(3).max(1) as usize;
    app.viewport_height = viewport;

    panel::draw(
        frame,
        &app.state.left,
        panes[0],
        app.state.active == PaneSide::Left,
        viewport,
    );
    panel::draw(
        frame,
        &app.state.right,
        panes[1],
        app.state.active == PaneSide::Right,
        viewport,
    );

    draw_buffer_bar(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = format!("twindir {}", env!("CARGO_PKG_VERSION"));
    frame.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

/// Buffer bar: mode counts plus the first few buffered names, cut items in
/// red, copies in green.
fn draw_buffer_bar<F: FilesystemPort>(frame: &mut Frame, app: &App<F>, area: Rect) {
    let block = Block::default()
        .title(" Buffer ")
        .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 1 {
        return;
    }

    let buffer = &app.state.buffer;
    let mut spans: Vec<Span> = Vec::new();
    if buffer.is_empty() {
        spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    } else {
        let copies = buffer.iter().filter(|b| b.mode == BufferMode::Copy).count();
        let cuts = buffer.len() - copies;
        let mut counts = Vec::new();
        if copies > 0 {
            counts.push(format!("{} copy", copies));
        }
        if cuts > 0 {
            counts.push(format!("{} cut", cuts));
        }
        spans.push(Span::styled(
            format!("[{}] ", counts.join(", ")),
            Style::default().fg(Color::DarkGray),
        ));
        for item in buffer.iter().take(BUFFER_PREVIEW) {
            let color = match item.mode {
                BufferMode::Copy => Color::Green,
                BufferMode::Cut => Color::Red,
            };
            let name = if item.entry.is_dir {
                format!("{}/ ", item.entry.name)
            } else {
                format!("{} ", item.entry.name)
            };
            spans.push(Span::styled(name, Style::default().fg(color)));
        }
        if buffer.len() > BUFFER_PREVIEW {
            spans.push(Span::styled(
                format!("+{} more", buffer.len() - BUFFER_PREVIEW),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), 1),
    );
}

fn draw_footer<F: FilesystemPort>(frame: &mut Frame, app: &App<F>, area: Rect) {
    let hints = "Tab:switch  Up/Down:navigate  Enter:open  Backspace:parent  c:copy  x:cut  p:paste  q:quit";
    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];

    if let Some(message) = app.message_text() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(entry) = app.active_pane().selected_entry() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            entry.name.clone(),
            Style::default().fg(Color::White),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
