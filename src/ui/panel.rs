use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::format_size;
use crate::core::selection::visible_slice;
use crate::core::{Entry, PaneState};

/// Draws one pane: truncated cwd title, the visible slice of entries with
/// the cursor row highlighted, and a bottom status row carrying the listing
/// error when the last navigation failed.
pub fn draw(frame: &mut Frame, pane: &PaneState, area: Rect, is_active: bool, viewport_height: usize) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let title = truncate_left(&pane.cwd.display().to_string(), inner_width.saturating_sub(2));
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(if is_active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_active { Color::Cyan } else { Color::DarkGray }));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    if pane.entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("(empty)", Style::default().fg(Color::DarkGray))),
            Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), 1),
        );
    }

    for (row, entry) in visible_slice(&pane.entries, pane.scroll, viewport_height)
        .iter()
        .enumerate()
    {
        let index = pane.scroll + row;
        let line = entry_line(entry, inner.width as usize);
        let styled = if index == pane.selected && is_active {
            Paragraph::new(line).style(Style::default().fg(Color::Black).bg(Color::Cyan))
        } else if index == pane.selected {
            Paragraph::new(line).style(Style::default().fg(Color::White).bg(Color::DarkGray))
        } else if entry.is_dir {
            Paragraph::new(line).style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        } else {
            Paragraph::new(line)
        };
        frame.render_widget(
            styled,
            Rect::new(inner.x, inner.y + row as u16, inner.width, 1),
        );
    }

    // Bottom status row: listing error, or nothing.
    if let Some(error) = &pane.error {
        let text = truncate_right(error, inner.width.saturating_sub(1) as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Red))),
            Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
        );
    }
}

/// One entry row: name (directories get a trailing slash), right-aligned
/// size and mtime columns when the pane is wide enough.
fn entry_line(entry: &Entry, width: usize) -> Line<'static> {
    let display_name = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };

    // size(8) + date(12) + separating spaces
    let detail_width = 8 + 12 + 2;
    if width <= detail_width + 6 {
        return Line::from(pad_right(&truncate_right(&display_name, width), width));
    }

    let name_width = width - detail_width;
    let size_str = match (entry.is_dir, entry.size) {
        (true, _) => "<DIR>".to_string(),
        (false, Some(size)) => format_size(size),
        (false, None) => "-".to_string(),
    };
    let date_str = entry
        .modified
        .map(|m| m.format("%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    Line::from(format!(
        "{} {:>8} {:>12}",
        pad_right(&truncate_right(&display_name, name_width), name_width),
        size_str,
        date_str,
    ))
}

/// Truncates to `max` display columns, keeping the start.
fn truncate_right(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return "...".chars().take(max).collect();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(1);
        if used + w > max - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Truncates to `max` display columns, keeping the end (for cwd titles).
fn truncate_left(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return "...".chars().take(max).collect();
    }
    let budget = max - 3;
    let mut used = 0;
    let mut tail = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(1);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    let suffix: String = tail.into_iter().rev().collect();
    format!("...{}", suffix)
}

fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(pad))
}
