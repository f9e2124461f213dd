use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use super::auth::{AuthAction, AuthMode, AuthScreen};
use super::avatar::{AvatarAction, AvatarPicker};
use super::dashboard::{Dashboard, DashboardAction};
use crate::error::Result;
use crate::settings::Settings;
use crate::state::{AppState, Route};

enum Screen {
    Auth(AuthScreen),
    AvatarSetup(AvatarPicker),
    Dashboard(Dashboard),
}

/// The interactive program: shared state plus whichever screen is showing.
pub struct App {
    state: AppState,
    screen: Screen,
    avatars: Vec<String>,
}

impl App {
    /// Start at the root route; without a session this lands on Login.
    pub fn new(state: AppState, avatars: Vec<String>) -> Self {
        let mut app = Self {
            state,
            screen: Screen::Auth(AuthScreen::new(AuthMode::SignIn)),
            avatars,
        };
        app.navigate(Route::root(), None);
        app
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Auth(auth) if auth.mode() == AuthMode::SignIn => Route::Login,
            Screen::Auth(_) => Route::Register,
            Screen::AvatarSetup(_) => Route::AvatarSetup,
            Screen::Dashboard(_) => Route::Dashboard,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn navigate(&mut self, requested: Route, status: Option<&str>) {
        let route = self.state.resolve(requested);
        tracing::debug!(?route, "navigate");
        let status = status.map(str::to_string);
        self.screen = match route {
            Route::Login | Route::Register => {
                let mode = if route == Route::Login {
                    AuthMode::SignIn
                } else {
                    AuthMode::SignUp
                };
                let mut auth = AuthScreen::new(mode);
                if let Some(msg) = status {
                    auth.set_status(msg);
                }
                Screen::Auth(auth)
            }
            Route::AvatarSetup => {
                let initial = self
                    .state
                    .session
                    .user()
                    .map(|u| u.initial())
                    .unwrap_or_default();
                let mut picker = AvatarPicker::new(self.avatars.clone(), initial);
                if let Some(msg) = status {
                    picker.set_status(msg);
                }
                Screen::AvatarSetup(picker)
            }
            Route::Dashboard => {
                let mut dash = Dashboard::new(self.state.session.user());
                if let Some(msg) = status {
                    dash.set_status(msg);
                }
                Screen::Dashboard(dash)
            }
        };
    }

    /// Feed one key press to the current screen. Returns true to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match &mut self.screen {
            Screen::Auth(auth) => match auth.handle_key(code) {
                AuthAction::Continue => {}
                AuthAction::Quit => return true,
                AuthAction::Switch => {
                    let next = match auth.mode() {
                        AuthMode::SignIn => Route::Register,
                        AuthMode::SignUp => Route::Login,
                    };
                    self.navigate(next, None);
                }
                AuthAction::Submit => match auth.mode() {
                    AuthMode::SignIn => {
                        self.state.session.login(auth.email(), auth.password());
                        self.navigate(Route::Dashboard, Some("Successfully logged in!"));
                    }
                    AuthMode::SignUp => {
                        self.state
                            .session
                            .register(auth.email(), auth.password(), auth.name());
                        self.navigate(Route::AvatarSetup, Some("Registration successful!"));
                    }
                },
            },
            Screen::AvatarSetup(picker) => match picker.handle_key(code) {
                AvatarAction::Continue => {}
                AvatarAction::Quit => return true,
                AvatarAction::Chosen(avatar) => {
                    self.state.session.set_avatar(&avatar);
                    self.navigate(Route::Dashboard, Some("Avatar updated successfully!"));
                }
            },
            Screen::Dashboard(dash) => match dash.handle_key(code, &mut self.state) {
                DashboardAction::Continue => {}
                DashboardAction::Quit => return true,
                DashboardAction::Logout => {
                    self.state.session.logout();
                    self.navigate(Route::Login, None);
                }
            },
        }
        false
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            Screen::Auth(auth) => auth.draw(frame),
            Screen::AvatarSetup(picker) => picker.draw(frame),
            Screen::Dashboard(dash) => dash.draw(frame, &self.state),
        }
    }
}

/// Own the terminal until the user quits.
pub fn run(mut app: App) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                if app.handle_key(key.code) {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    tracing::info!(
        route = ?app.route(),
        transactions = app.state().store.len(),
        "interactive session ended"
    );
    result
}

/// `finboard` with no subcommand: a fresh, signed-out app.
pub fn start(settings: &Settings) -> Result<()> {
    run(App::new(AppState::new(), settings.avatar_options()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionInput, TxnType};

    fn app() -> App {
        App::new(AppState::new(), vec!["a.png".into(), "b.png".into()])
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    fn sign_in(app: &mut App) {
        type_text(app, "a@b.com");
        app.handle_key(KeyCode::Enter);
        type_text(app, "x");
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn root_redirects_to_login_without_session() {
        assert_eq!(app().route(), Route::Login);
    }

    #[test]
    fn root_is_dashboard_with_session() {
        let mut state = AppState::new();
        state.session.login("a@b.com", "x");
        let app = App::new(state, vec!["a.png".into()]);
        assert_eq!(app.route(), Route::Dashboard);
    }

    #[test]
    fn login_lands_on_dashboard() {
        let mut app = app();
        sign_in(&mut app);
        assert_eq!(app.route(), Route::Dashboard);
        let user = app.state().session.user().unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.name, "User");
    }

    #[test]
    fn switch_link_toggles_login_and_register() {
        let mut app = app();
        for _ in 0..3 {
            app.handle_key(KeyCode::Tab);
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.route(), Route::Register);
        for _ in 0..4 {
            app.handle_key(KeyCode::Tab);
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.route(), Route::Login);
    }

    #[test]
    fn register_then_avatar_then_dashboard() {
        let mut app = app();
        for _ in 0..3 {
            app.handle_key(KeyCode::Tab);
        }
        app.handle_key(KeyCode::Enter);

        type_text(&mut app, "Riya Sen");
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "r@b.com");
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "pw");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.route(), Route::AvatarSetup);

        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.route(), Route::Dashboard);
        let user = app.state().session.user().unwrap();
        assert_eq!(user.name, "Riya Sen");
        assert_eq!(user.avatar.as_deref(), Some("b.png"));
    }

    #[test]
    fn logout_returns_to_login_and_keeps_transactions() {
        let mut app = app();
        sign_in(&mut app);
        app.state.store.add(TransactionInput {
            title: "Paycheck".into(),
            amount: 1000.0,
            category: Category::SalaryAndWages,
            txn_type: TxnType::Income,
            date: None,
        });

        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.route(), Route::Login);
        assert!(!app.state().session.is_authenticated());
        assert_eq!(app.state().store.len(), 1);
    }

    #[test]
    fn quit_from_every_screen() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Esc));
        sign_in(&mut app);
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
