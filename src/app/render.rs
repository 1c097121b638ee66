use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::state::App;

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        // Split the terminal into three areas: input, suggestions, status
        let layout = Layout::vertical([
            Constraint::Length(3), // Input field is fixed 3 lines
            Constraint::Min(1),    // Suggestion list takes the rest
            Constraint::Length(1), // Status line at bottom
        ])
        .split(frame.area());

        self.render_input_field(frame, layout[0]);
        self.render_suggestions(frame, layout[1]);
        self.render_status_line(frame, layout[2]);
    }

    /// Render the input field (top)
    fn render_input_field(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.search.has_error() {
            Color::Red
        } else {
            Color::Cyan
        };

        // The title doubles as the region label once one is classified
        let title = match self.search.region().name() {
            Some(name) => format!(" {} ", name),
            None => " Enter a postcode ".to_string(),
        };

        self.input.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(&self.input.textarea, area);
    }

    /// Render the suggestion list, or the resolved postcode once the query
    /// settles on exactly one
    fn render_suggestions(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(postcode) = self.search.resolved() {
            let line = Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::styled(
                    postcode.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  (Enter to accept)"),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let items: Vec<ListItem> = self
            .search
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, suggestion)| {
                let split = typed_span_len(&suggestion.text, suggestion.highlight_len);
                let (typed, rest) = suggestion.text.split_at(split);
                let mut line = Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        typed.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(rest.to_string()),
                ]);
                if Some(i) == self.selected {
                    line = line.style(Style::default().add_modifier(Modifier::REVERSED));
                }
                ListItem::new(line)
            })
            .collect();

        frame.render_widget(List::new(items), area);
    }

    /// Render the status line (bottom)
    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let line = if !self.search.is_online() {
            Line::from(Span::styled(
                " ⚠ Offline: suggestions paused, retrying shortly",
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(warning) = &self.warning {
            Line::from(Span::styled(
                format!(" ⚠ {}", warning),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                " ↑/↓ select | Enter accept | Esc clear | Ctrl+C quit",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Clamp a highlight span to the candidate and to a char boundary. Postcodes
/// are ASCII in practice; this only matters for hostile service data.
fn typed_span_len(text: &str, highlight_len: usize) -> usize {
    let mut len = highlight_len.min(text.len());
    while len > 0 && !text.is_char_boundary(len) {
        len -= 1;
    }
    len
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
