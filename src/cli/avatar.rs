use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::{centered, chart_color, draw_button, FOOTER_STYLE, HEADER_STYLE, STATUS_STYLE};

pub enum AvatarAction {
    Continue,
    /// The user confirmed this avatar reference.
    Chosen(String),
    Quit,
}

/// Short label for an avatar reference: the last path segment without query.
pub fn avatar_label(reference: &str) -> &str {
    let no_query = reference.split('?').next().unwrap_or(reference);
    no_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(reference)
}

pub struct AvatarPicker {
    options: Vec<String>,
    selection: usize,
    initial: String,
    status: Option<String>,
}

impl AvatarPicker {
    /// `options` must not be empty; the first one starts selected.
    pub fn new(options: Vec<String>, initial: String) -> Self {
        Self {
            options,
            selection: 0,
            initial,
            status: None,
        }
    }

    pub fn set_status(&mut self, msg: String) {
        self.status = Some(msg);
    }

    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.selection).map(String::as_str)
    }

    pub fn handle_key(&mut self, code: KeyCode) -> AvatarAction {
        self.status = None;
        let last = self.options.len().saturating_sub(1);
        match code {
            KeyCode::Left | KeyCode::Up => self.selection = self.selection.saturating_sub(1),
            KeyCode::Right | KeyCode::Down => self.selection = (self.selection + 1).min(last),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(d) = c.to_digit(10) {
                    let idx = d as usize;
                    if idx >= 1 && idx <= self.options.len() {
                        self.selection = idx - 1;
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(choice) = self.selected() {
                    return AvatarAction::Chosen(choice.to_string());
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => return AvatarAction::Quit,
            _ => {}
        }
        AvatarAction::Continue
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let list_height = self.options.len() as u16;
        let [_top, heading_area, blurb_area, _gap1, preview_area, _gap2, list_area, _gap3, button_area, status_area, hints_area, _bottom] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(list_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled("Choose your avatar", HEADER_STYLE))
                .alignment(Alignment::Center),
            heading_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Select an avatar to personalize your profile",
                FOOTER_STYLE,
            ))
            .alignment(Alignment::Center),
            blurb_area,
        );

        // Preview: the user's initial framed in the selected avatar's colour
        let preview = centered(preview_area, 7);
        let color = chart_color(self.selection);
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.initial.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            preview,
        );

        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, opt)| {
                let marker = if i == self.selection { ">" } else { " " };
                let style = if i == self.selection {
                    Style::default().fg(chart_color(i)).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!(" {marker} {}) {}", i + 1, avatar_label(opt)),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), centered(list_area, 50));

        draw_button(frame, button_area, "Continue to Dashboard", true, true);

        if let Some(msg) = &self.status {
            frame.render_widget(
                Paragraph::new(Span::styled(msg.as_str(), STATUS_STYLE)).alignment(Alignment::Center),
                status_area,
            );
        }

        frame.render_widget(
            Paragraph::new(" \u{2190}\u{2192}/1-9=choose  Enter=continue  Esc=quit")
                .style(FOOTER_STYLE)
                .alignment(Alignment::Center),
            hints_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> AvatarPicker {
        AvatarPicker::new(
            vec!["url1".into(), "url2".into(), "url3".into()],
            "U".into(),
        )
    }

    #[test]
    fn first_option_starts_selected() {
        assert_eq!(picker().selected(), Some("url1"));
    }

    #[test]
    fn arrows_clamp_at_ends() {
        let mut p = picker();
        p.handle_key(KeyCode::Left);
        assert_eq!(p.selected(), Some("url1"));
        p.handle_key(KeyCode::Right);
        p.handle_key(KeyCode::Right);
        p.handle_key(KeyCode::Right);
        assert_eq!(p.selected(), Some("url3"));
    }

    #[test]
    fn digits_jump_to_option() {
        let mut p = picker();
        p.handle_key(KeyCode::Char('2'));
        assert_eq!(p.selected(), Some("url2"));
        p.handle_key(KeyCode::Char('9'));
        assert_eq!(p.selected(), Some("url2"));
    }

    #[test]
    fn enter_confirms_selection() {
        let mut p = picker();
        p.handle_key(KeyCode::Char('3'));
        match p.handle_key(KeyCode::Enter) {
            AvatarAction::Chosen(url) => assert_eq!(url, "url3"),
            _ => panic!("expected a choice"),
        }
    }

    #[test]
    fn status_clears_on_next_key() {
        let mut p = picker();
        p.set_status("Registration successful!".into());
        p.handle_key(KeyCode::Right);
        assert!(p.status.is_none());
    }

    #[test]
    fn label_strips_path_and_query() {
        assert_eq!(
            avatar_label("https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=100&h=100&fit=crop"),
            "photo-1535713875002-d1d0cf377fde"
        );
        assert_eq!(avatar_label("plain"), "plain");
    }
}
