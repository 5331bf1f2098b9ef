//! Sign-in / sign-up screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::{LoginRequest, RegisterRequest};
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Submitting,
    Error,
}

/// Action requested by a key press on the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    None,
    SubmitLogin(LoginRequest),
    SubmitRegister(RegisterRequest),
    Quit,
}

/// Login screen UI.
pub struct LoginScreen {
    mode: LoginMode,
    state: LoginState,
    name_input: TextInput,
    email_input: TextInput,
    password_input: TextInput,
    focus: usize,
    error_message: Option<String>,
}

impl LoginScreen {
    /// Creates a new login screen in sign-in mode.
    #[must_use]
    pub fn new() -> Self {
        let name_input = TextInput::new("Name").placeholder("Your display name");
        let mut email_input = TextInput::new("Email").placeholder("you@example.com");
        let password_input = TextInput::new("Password").password();
        email_input.set_focused(true);

        Self {
            mode: LoginMode::SignIn,
            state: LoginState::Input,
            name_input,
            email_input,
            password_input,
            focus: 0,
            error_message: None,
        }
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> LoginMode {
        self.mode
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Sets the submitting state; input is ignored until resolved.
    pub fn set_submitting(&mut self) {
        self.state = LoginState::Submitting;
        self.error_message = None;
    }

    /// Sets the error state with a message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
    }

    /// Returns to the input state.
    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    /// Switches to sign-in mode and clears the password, e.g. after a
    /// successful registration.
    pub fn switch_to_sign_in(&mut self) {
        self.mode = LoginMode::SignIn;
        self.state = LoginState::Input;
        self.password_input.clear();
        self.focus = 0;
        self.sync_focus();
    }

    fn inputs(&mut self) -> Vec<&mut TextInput> {
        match self.mode {
            LoginMode::SignIn => vec![&mut self.email_input, &mut self.password_input],
            LoginMode::SignUp => vec![
                &mut self.name_input,
                &mut self.email_input,
                &mut self.password_input,
            ],
        }
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        for (i, input) in self.inputs().into_iter().enumerate() {
            input.set_focused(i == focus);
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let count = self.inputs().len();
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.sync_focus();
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.focus = 0;
        self.sync_focus();
    }

    fn submit(&self) -> LoginAction {
        match self.mode {
            LoginMode::SignIn => {
                if self.email_input.is_empty() || self.password_input.is_empty() {
                    return LoginAction::None;
                }
                LoginAction::SubmitLogin(LoginRequest::new(
                    self.email_input.value(),
                    self.password_input.value(),
                ))
            }
            LoginMode::SignUp => {
                if self.name_input.is_empty()
                    || self.email_input.is_empty()
                    || self.password_input.is_empty()
                {
                    return LoginAction::None;
                }
                LoginAction::SubmitRegister(RegisterRequest::new(
                    self.name_input.value(),
                    self.email_input.value(),
                    self.password_input.value(),
                ))
            }
        }
    }

    /// Handles a key event, returning the requested action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Submitting {
            return LoginAction::None;
        }

        if self.state == LoginState::Error {
            self.reset();
            return LoginAction::None;
        }

        match key.code {
            KeyCode::Esc => return LoginAction::Quit,
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_mode();
            }
            _ => {
                let focus = self.focus;
                if let Some(input) = self.inputs().into_iter().nth(focus) {
                    input.handle_key(key);
                }
            }
        }

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let box_height = match self.mode {
            LoginMode::SignIn => 12,
            LoginMode::SignUp => 15,
        };

        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(box_height),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let title = match self.mode {
            LoginMode::SignIn => " Pollux — Sign In ",
            LoginMode::SignUp => " Pollux — Sign Up ",
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        match self.mode {
            LoginMode::SignIn => {
                let layout = Layout::vertical([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ]);
                let areas = layout.areas::<4>(inner);
                (&self.email_input).render(areas[0], buf);
                (&self.password_input).render(areas[1], buf);
                self.render_status(areas[3], buf);
            }
            LoginMode::SignUp => {
                let layout = Layout::vertical([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ]);
                let areas = layout.areas::<5>(inner);
                (&self.name_input).render(areas[0], buf);
                (&self.email_input).render(areas[1], buf);
                (&self.password_input).render(areas[2], buf);
                self.render_status(areas[4], buf);
            }
        }
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let status = match self.state {
            LoginState::Input => {
                let switch_hint = match self.mode {
                    LoginMode::SignIn => "Ctrl+R: Sign Up",
                    LoginMode::SignUp => "Ctrl+R: Sign In",
                };
                Line::from(vec![
                    Span::styled("Enter: Submit", Style::default().fg(Color::DarkGray)),
                    Span::raw(" | "),
                    Span::styled(switch_hint, Style::default().fg(Color::DarkGray)),
                    Span::raw(" | "),
                    Span::styled("Esc: Quit", Style::default().fg(Color::DarkGray)),
                ])
            }
            LoginState::Submitting => Line::from(Span::styled(
                match self.mode {
                    LoginMode::SignIn => "Signing in...",
                    LoginMode::SignUp => "Registering...",
                },
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::from(Span::styled(
                    format!("Error: {msg}"),
                    Style::default().fg(Color::Red),
                ))
            }
        };
        Paragraph::new(status).render(area, buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_state() {
        let screen = LoginScreen::new();
        assert_eq!(screen.mode(), LoginMode::SignIn);
        assert_eq!(screen.state(), LoginState::Input);
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "ada@example.com");

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
    }

    #[test]
    fn test_submit_login() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "ada@example.com");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "hunter2");

        let action = screen.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            LoginAction::SubmitLogin(LoginRequest::new("ada@example.com", "hunter2"))
        );
    }

    #[test]
    fn test_mode_toggle_and_register_submit() {
        let mut screen = LoginScreen::new();
        screen.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(screen.mode(), LoginMode::SignUp);

        type_text(&mut screen, "Ada");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "ada@example.com");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "hunter2");

        let action = screen.handle_key(key(KeyCode::Enter));
        assert_eq!(
            action,
            LoginAction::SubmitRegister(RegisterRequest::new(
                "Ada",
                "ada@example.com",
                "hunter2"
            ))
        );
    }

    #[test]
    fn test_submitting_state_swallows_keys() {
        let mut screen = LoginScreen::new();
        screen.set_submitting();

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('x'))),
            LoginAction::None
        );
        assert_eq!(screen.state(), LoginState::Submitting);
    }

    #[test]
    fn test_error_state_resets_on_key() {
        let mut screen = LoginScreen::new();
        screen.set_error("bad credentials");
        assert_eq!(screen.state(), LoginState::Error);

        screen.handle_key(key(KeyCode::Char('x')));
        assert_eq!(screen.state(), LoginState::Input);
    }

    #[test]
    fn test_escape_quits() {
        let mut screen = LoginScreen::new();
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), LoginAction::Quit);
    }

    #[test]
    fn test_switch_to_sign_in_clears_password() {
        let mut screen = LoginScreen::new();
        screen.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        type_text(&mut screen, "Ada");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "ada@example.com");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "pw");

        screen.switch_to_sign_in();

        assert_eq!(screen.mode(), LoginMode::SignIn);
        let action = screen.handle_key(key(KeyCode::Enter));
        assert_eq!(action, LoginAction::None);
    }
}
