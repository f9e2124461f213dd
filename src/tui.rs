use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use zeroize::Zeroize;

use crate::fmt::rupees;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Red);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const STATUS_STYLE: Style = Style::new().fg(Color::Yellow);
pub const ERROR_STYLE: Style = Style::new().fg(Color::Red);

/// Slice colours for the category breakdown, reused cyclically.
pub const CHART_COLORS: &[Color] = &[
    Color::Rgb(0xFF, 0x63, 0x84),
    Color::Rgb(0x36, 0xA2, 0xEB),
    Color::Rgb(0xFF, 0xCE, 0x56),
    Color::Rgb(0x4B, 0xC0, 0xC0),
    Color::Rgb(0x99, 0x66, 0xFF),
    Color::Rgb(0xFF, 0x9F, 0x40),
    Color::Rgb(0xC9, 0xCB, 0xCF),
];

pub fn chart_color(idx: usize) -> Color {
    CHART_COLORS[idx % CHART_COLORS.len()]
}

/// Format an amount as a colored Span with an explicit +/- prefix.
pub fn signed_money_span(amount: f64) -> Span<'static> {
    let (sign, style) = if amount < 0.0 {
        ('-', AMOUNT_NEG_STYLE)
    } else {
        ('+', AMOUNT_POS_STYLE)
    };
    Span::styled(format!("{sign}{}", rupees(amount.abs())), style)
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// Center a fixed-width column inside `area`.
pub fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let x = area.x + area.width.saturating_sub(width) / 2;
    Rect::new(x, area.y, width, area.height)
}

// ---------------------------------------------------------------------------
// Single-line text input
// ---------------------------------------------------------------------------

/// An editable line of text with a cursor. Masked fields render as dots and
/// wipe their contents when dropped.
#[derive(Debug, Default)]
pub struct TextField {
    value: String,
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            masked: true,
        }
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            masked: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Convert the char-index cursor position to a byte offset in the string.
    fn cursor_byte_pos(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Apply an editing key. Returns false for keys that are not editing keys
    /// so the caller can treat them as navigation.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                let byte_pos = self.cursor_byte_pos();
                self.value.insert(byte_pos, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte_pos = self.cursor_byte_pos();
                    self.value.remove(byte_pos);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let byte_pos = self.cursor_byte_pos();
                    self.value.remove(byte_pos);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            _ => return false,
        }
        true
    }

    /// Text to render; the active field shows a block cursor.
    pub fn display(&self, active: bool) -> String {
        if active {
            insert_cursor(&self.value, self.cursor, self.masked)
        } else if self.masked {
            "\u{25cf}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

impl Drop for TextField {
    fn drop(&mut self) {
        if self.masked {
            self.value.zeroize();
        }
    }
}

/// Build a display string with a block cursor inserted at `cursor_pos`.
fn insert_cursor(value: &str, cursor_pos: usize, masked: bool) -> String {
    let mut display = if masked {
        "\u{25cf}".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let byte_pos = display
        .char_indices()
        .nth(cursor_pos)
        .map(|(i, _)| i)
        .unwrap_or(display.len());
    display.insert(byte_pos, '\u{2588}');
    display
}

/// Render a labelled input row: bold label while active, highlighted input.
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, field: &TextField, active: bool) {
    draw_row(frame, area, label, &field.display(active), active);
}

/// Render a labelled row whose value is not free text (pickers, toggles).
pub fn draw_row(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let label_width = 12u16;
    let [label_area, input_area] = Layout::horizontal([
        Constraint::Length(label_width),
        Constraint::Fill(1),
    ])
    .areas(area);

    let label_style = if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{:<width$}", label, width = label_width as usize),
            label_style,
        )),
        label_area,
    );

    let padded = format!("{:<width$}", value, width = input_area.width as usize);
    let style = if active {
        SELECTED_STYLE
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(Paragraph::new(Span::styled(padded, style)), input_area);
}

/// Render a `[ Label ]` button, underlined when focused.
pub fn draw_button(frame: &mut Frame, area: Rect, label: &str, focused: bool, enabled: bool) {
    let style = if !enabled {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else if focused {
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("[ {label} ]"), style))
            .alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextField {
        let mut f = TextField::new();
        for c in text.chars() {
            f.handle_key(KeyCode::Char(c));
        }
        f
    }

    #[test]
    fn typing_and_backspace() {
        let mut f = typed("abc");
        assert_eq!(f.value(), "abc");
        f.handle_key(KeyCode::Backspace);
        assert_eq!(f.value(), "ab");
    }

    #[test]
    fn insert_in_middle_with_multibyte_chars() {
        let mut f = typed("₹5");
        f.handle_key(KeyCode::Left);
        f.handle_key(KeyCode::Char('1'));
        assert_eq!(f.value(), "₹15");
        f.handle_key(KeyCode::Home);
        f.handle_key(KeyCode::Delete);
        assert_eq!(f.value(), "15");
    }

    #[test]
    fn navigation_keys_are_not_consumed() {
        let mut f = TextField::new();
        assert!(!f.handle_key(KeyCode::Enter));
        assert!(!f.handle_key(KeyCode::Up));
        assert!(!f.handle_key(KeyCode::Tab));
    }

    #[test]
    fn masked_display_hides_value() {
        let mut f = TextField::masked();
        f.handle_key(KeyCode::Char('p'));
        f.handle_key(KeyCode::Char('w'));
        assert_eq!(f.display(false), "\u{25cf}\u{25cf}");
        assert_eq!(f.display(true), "\u{25cf}\u{25cf}\u{2588}");
        assert_eq!(f.value(), "pw");
    }

    #[test]
    fn prefilled_cursor_starts_at_end() {
        let mut f = TextField::with_value("12.5");
        f.handle_key(KeyCode::Char('0'));
        assert_eq!(f.value(), "12.50");
        assert!(!f.is_blank());
        assert!(TextField::with_value("  ").is_blank());
    }

    #[test]
    fn signed_span_prefixes() {
        assert_eq!(signed_money_span(-4.5).content, "-₹4.50");
        assert_eq!(signed_money_span(1000.0).content, "+₹1,000.00");
    }

    #[test]
    fn chart_colors_cycle() {
        assert_eq!(chart_color(0), chart_color(CHART_COLORS.len()));
    }
}
