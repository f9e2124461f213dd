use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::{
    centered, draw_button, draw_field, TextField, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE,
    STATUS_STYLE,
};

/// Which of the two sign-in views is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Password,
    Submit,
    Switch,
}

const SIGN_IN_FIELDS: &[Field] = &[Field::Email, Field::Password, Field::Submit, Field::Switch];
const SIGN_UP_FIELDS: &[Field] = &[
    Field::Name,
    Field::Email,
    Field::Password,
    Field::Submit,
    Field::Switch,
];

pub enum AuthAction {
    Continue,
    /// Every required field is filled in; the caller signs the user in.
    Submit,
    /// Go to the other view (login <-> register).
    Switch,
    Quit,
}

/// Login and registration form.
pub struct AuthScreen {
    mode: AuthMode,
    name: TextField,
    email: TextField,
    password: TextField,
    active: usize,
    error: Option<String>,
    status: Option<String>,
}

impl AuthScreen {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            name: TextField::new(),
            email: TextField::new(),
            password: TextField::masked(),
            active: 0,
            error: None,
            status: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        self.name.value().trim()
    }

    pub fn email(&self) -> &str {
        self.email.value().trim()
    }

    pub fn password(&self) -> &str {
        self.password.value()
    }

    pub fn set_status(&mut self, msg: String) {
        self.status = Some(msg);
    }

    fn fields(&self) -> &'static [Field] {
        match self.mode {
            AuthMode::SignIn => SIGN_IN_FIELDS,
            AuthMode::SignUp => SIGN_UP_FIELDS,
        }
    }

    fn active_field(&self) -> Field {
        let fields = self.fields();
        fields[self.active.min(fields.len() - 1)]
    }

    fn field_mut(&mut self, field: Field) -> Option<&mut TextField> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::Submit | Field::Switch => None,
        }
    }

    /// Required-field check standing in for the browser's form validation.
    fn missing_input(&self) -> Option<&'static str> {
        if self.mode == AuthMode::SignUp && self.name.is_blank() {
            return Some("Please enter your full name.");
        }
        if self.email.is_blank() {
            return Some("Please enter your email.");
        }
        if !self.email().contains('@') {
            return Some("Please enter a valid email address.");
        }
        if self.password.value().is_empty() {
            return Some("Please enter your password.");
        }
        None
    }

    fn submit(&mut self) -> AuthAction {
        match self.missing_input() {
            Some(msg) => {
                self.error = Some(msg.to_string());
                AuthAction::Continue
            }
            None => AuthAction::Submit,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> AuthAction {
        self.status = None;
        let last = self.fields().len() - 1;
        match code {
            KeyCode::Esc => return AuthAction::Quit,
            KeyCode::Tab | KeyCode::Down => {
                self.active = (self.active + 1).min(last);
                return AuthAction::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = self.active.saturating_sub(1);
                return AuthAction::Continue;
            }
            KeyCode::Enter => {
                return match self.active_field() {
                    Field::Submit | Field::Password => self.submit(),
                    Field::Switch => AuthAction::Switch,
                    _ => {
                        self.active = (self.active + 1).min(last);
                        AuthAction::Continue
                    }
                };
            }
            _ => {}
        }

        let field = self.active_field();
        if let Some(input) = self.field_mut(field) {
            if input.handle_key(code) {
                self.error = None;
            }
        }
        AuthAction::Continue
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let (heading, blurb, cta, switch_text) = match self.mode {
            AuthMode::SignIn => (
                "Welcome back",
                "Enter your credentials to access your account",
                "Sign in",
                "Don't have an account? Sign up",
            ),
            AuthMode::SignUp => (
                "Create an account",
                "Enter your details to get started",
                "Sign up",
                "Already have an account? Sign in",
            ),
        };
        let field_rows = match self.mode {
            AuthMode::SignIn => 2,
            AuthMode::SignUp => 3,
        };

        let [_top, heading_area, blurb_area, _gap1, form_area, _gap2, button_area, switch_area, _gap3, message_area, hints_area, _bottom] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(field_rows),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(heading, HEADER_STYLE)).alignment(Alignment::Center),
            heading_area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(blurb, FOOTER_STYLE)).alignment(Alignment::Center),
            blurb_area,
        );

        let form = centered(form_area, 50);
        let rows: Vec<Rect> = Layout::vertical(vec![Constraint::Length(1); field_rows as usize])
            .split(form)
            .to_vec();
        let active = self.active_field();
        let mut row = rows.iter();
        if self.mode == AuthMode::SignUp {
            if let Some(r) = row.next() {
                draw_field(frame, *r, "Full Name", &self.name, active == Field::Name);
            }
        }
        if let Some(r) = row.next() {
            draw_field(frame, *r, "Email", &self.email, active == Field::Email);
        }
        if let Some(r) = row.next() {
            draw_field(frame, *r, "Password", &self.password, active == Field::Password);
        }

        draw_button(frame, button_area, cta, active == Field::Submit, true);

        let switch_style = if active == Field::Switch {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            FOOTER_STYLE
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(switch_text, switch_style)))
                .alignment(Alignment::Center),
            switch_area,
        );

        if let Some(msg) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(msg.as_str(), ERROR_STYLE)).alignment(Alignment::Center),
                message_area,
            );
        } else if let Some(msg) = &self.status {
            frame.render_widget(
                Paragraph::new(Span::styled(msg.as_str(), STATUS_STYLE)).alignment(Alignment::Center),
                message_area,
            );
        }

        frame.render_widget(
            Paragraph::new(" Tab/\u{2191}\u{2193}=field  Enter=submit  Esc=quit")
                .style(FOOTER_STYLE)
                .alignment(Alignment::Center),
            hints_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(screen: &mut AuthScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn sign_in_walks_email_password_submit_switch() {
        let mut s = AuthScreen::new(AuthMode::SignIn);
        assert_eq!(s.active_field(), Field::Email);
        s.handle_key(KeyCode::Tab);
        assert_eq!(s.active_field(), Field::Password);
        s.handle_key(KeyCode::Tab);
        assert_eq!(s.active_field(), Field::Submit);
        s.handle_key(KeyCode::Tab);
        assert_eq!(s.active_field(), Field::Switch);
        s.handle_key(KeyCode::Tab);
        assert_eq!(s.active_field(), Field::Switch);
    }

    #[test]
    fn sign_up_starts_at_name() {
        let s = AuthScreen::new(AuthMode::SignUp);
        assert_eq!(s.active_field(), Field::Name);
    }

    #[test]
    fn empty_form_does_not_submit() {
        let mut s = AuthScreen::new(AuthMode::SignIn);
        s.active = 2;
        assert!(matches!(s.handle_key(KeyCode::Enter), AuthAction::Continue));
        assert!(s.error.is_some());
    }

    #[test]
    fn email_without_at_is_rejected() {
        let mut s = AuthScreen::new(AuthMode::SignIn);
        type_text(&mut s, "nobody");
        s.handle_key(KeyCode::Tab);
        type_text(&mut s, "pw");
        assert!(matches!(s.handle_key(KeyCode::Enter), AuthAction::Continue));
        assert_eq!(s.error.as_deref(), Some("Please enter a valid email address."));
    }

    #[test]
    fn filled_sign_in_submits_from_password_field() {
        let mut s = AuthScreen::new(AuthMode::SignIn);
        type_text(&mut s, "a@b.com");
        s.handle_key(KeyCode::Enter);
        type_text(&mut s, "x");
        assert!(matches!(s.handle_key(KeyCode::Enter), AuthAction::Submit));
        assert_eq!(s.email(), "a@b.com");
        assert_eq!(s.password(), "x");
    }

    #[test]
    fn sign_up_requires_name() {
        let mut s = AuthScreen::new(AuthMode::SignUp);
        s.active = 1;
        type_text(&mut s, "r@b.com");
        s.handle_key(KeyCode::Tab);
        type_text(&mut s, "pw");
        assert!(matches!(s.handle_key(KeyCode::Enter), AuthAction::Continue));
        assert_eq!(s.error.as_deref(), Some("Please enter your full name."));

        s.active = 0;
        type_text(&mut s, "Riya");
        assert!(s.error.is_none());
        s.active = 3;
        assert!(matches!(s.handle_key(KeyCode::Enter), AuthAction::Submit));
        assert_eq!(s.name(), "Riya");
    }

    #[test]
    fn enter_on_link_switches_view() {
        let mut s = AuthScreen::new(AuthMode::SignIn);
        s.active = 3;
        assert!(matches!(s.handle_key(KeyCode::Enter), AuthAction::Switch));
    }

    #[test]
    fn esc_quits() {
        let mut s = AuthScreen::new(AuthMode::SignUp);
        assert!(matches!(s.handle_key(KeyCode::Esc), AuthAction::Quit));
    }
}
