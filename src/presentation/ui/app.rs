//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::dto::{LoginRequest, RegisterRequest};
use crate::application::services::NotificationManager;
use crate::application::session_manager::SessionManager;
use crate::domain::entities::{AuthToken, Identity, Poll, PollId, PollOption};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, PollDataPort, TokenStoragePort};
use crate::domain::tally::{TallyResult, aggregate};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{
    CreateAction, CreatePollScreen, LoginAction, LoginScreen, NotificationPopup, PollsAction,
    PollsScreen, PollsTab, ResultsAction, ResultsScreen, VoteAction, VoteScreen,
};

const NOTIFICATION_TICK_RATE: Duration = Duration::from_millis(250);

/// Results of async poll-service fetches, delivered back to the event
/// loop. Each carries enough context for the receiving screen to discard
/// it when the user has already navigated away.
#[derive(Debug)]
enum Action {
    PollsLoaded {
        tab: PollsTab,
        polls: Vec<Poll>,
    },
    PollsFailed {
        tab: PollsTab,
        message: String,
    },
    OptionsLoaded {
        poll_id: PollId,
        options: Vec<PollOption>,
    },
    OptionsFailed {
        poll_id: PollId,
        message: String,
    },
    ResultsLoaded {
        poll_id: PollId,
        options: Vec<PollOption>,
        result: TallyResult,
    },
    ResultsFailed {
        poll_id: PollId,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Auth,
    Browse,
    Exiting,
}

enum CurrentScreen {
    Login(LoginScreen),
    Polls(PollsScreen),
    Vote(VoteScreen),
    Results(ResultsScreen),
    Create(CreatePollScreen),
}

pub struct App {
    state: AppState,
    screen: CurrentScreen,
    session: SessionManager,
    poll_data: Arc<dyn PollDataPort>,
    notifications: NotificationManager,
    last_tab: PollsTab,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        poll_data: Arc<dyn PollDataPort>,
        storage_port: Arc<dyn TokenStoragePort>,
        notification_duration: Duration,
    ) -> Self {
        let session = SessionManager::new(auth_port, storage_port);
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::Auth,
            screen: CurrentScreen::Login(LoginScreen::new()),
            session,
            poll_data,
            notifications: NotificationManager::with_duration(notification_duration),
            last_tab: PollsTab::Open,
            action_tx,
            action_rx,
        }
    }

    /// Runs the application until the user quits.
    ///
    /// Hydration happens here, before the first draw, so no screen ever
    /// reads the session before it is settled.
    ///
    /// # Errors
    /// Returns error if the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if self.session.hydrate().await {
            info!("Restored session, entering poll list");
            self.enter_polls(PollsTab::Open);
        }

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut notification_interval = interval(NOTIFICATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event).await == EventResult::Exit {
                        self.state = AppState::Exiting;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = notification_interval.tick() => {
                    self.notifications.tick();
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    async fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key).await,
            _ => EventResult::Continue,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        match &self.screen {
            CurrentScreen::Login(screen) => frame.render_widget(screen, frame.area()),
            CurrentScreen::Polls(screen) => frame.render_widget(screen, frame.area()),
            CurrentScreen::Vote(screen) => frame.render_widget(screen, frame.area()),
            CurrentScreen::Results(screen) => frame.render_widget(screen, frame.area()),
            CurrentScreen::Create(screen) => frame.render_widget(screen, frame.area()),
        }

        if let Some(notification) = self.notifications.current() {
            frame.render_widget(NotificationPopup::new(notification), frame.area());
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        match &mut self.screen {
            CurrentScreen::Login(screen) => {
                let action = screen.handle_key(key);
                self.handle_login_action(action).await
            }
            CurrentScreen::Polls(screen) => {
                let action = screen.handle_key(key);
                self.handle_polls_action(action).await
            }
            CurrentScreen::Vote(screen) => {
                let action = screen.handle_key(key);
                self.handle_vote_action(action).await
            }
            CurrentScreen::Results(screen) => {
                let action = screen.handle_key(key);
                self.handle_results_action(action)
            }
            CurrentScreen::Create(screen) => {
                let action = screen.handle_key(key);
                self.handle_create_action(action).await
            }
        }
    }

    async fn handle_login_action(&mut self, action: LoginAction) -> EventResult {
        match action {
            LoginAction::None => {}
            LoginAction::Quit => return EventResult::Exit,
            LoginAction::SubmitLogin(request) => self.handle_login_submit(request).await,
            LoginAction::SubmitRegister(request) => self.handle_register_submit(request).await,
        }
        EventResult::Continue
    }

    async fn handle_login_submit(&mut self, request: LoginRequest) {
        if self.session.session().is_loading() {
            return;
        }
        if let CurrentScreen::Login(ref mut screen) = self.screen {
            screen.set_submitting();
        }

        match self.session.login(request).await {
            Ok(()) => {
                self.notifications.success("Successfully logged in!");
                self.enter_polls(PollsTab::Open);
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                let message = Self::login_error_message(&e);
                self.notifications.error(message.clone());
                if let CurrentScreen::Login(ref mut screen) = self.screen {
                    screen.set_error(message);
                }
            }
        }
    }

    async fn handle_register_submit(&mut self, request: RegisterRequest) {
        if self.session.session().is_loading() {
            return;
        }
        if let CurrentScreen::Login(ref mut screen) = self.screen {
            screen.set_submitting();
        }

        match self.session.register(request).await {
            Ok(()) => {
                self.notifications
                    .success("Successfully registered! You can now sign in.");
                if let CurrentScreen::Login(ref mut screen) = self.screen {
                    screen.switch_to_sign_in();
                }
            }
            Err(e) => {
                error!(error = %e, "Registration failed");
                let message = Self::login_error_message(&e);
                self.notifications.error(message.clone());
                if let CurrentScreen::Login(ref mut screen) = self.screen {
                    screen.set_error(message);
                }
            }
        }
    }

    async fn handle_polls_action(&mut self, action: PollsAction) -> EventResult {
        match action {
            PollsAction::None => {}
            PollsAction::Quit => return EventResult::Exit,
            PollsAction::Refresh => {
                let tab = self.last_tab;
                if let CurrentScreen::Polls(ref mut screen) = self.screen {
                    screen.set_loading(tab);
                }
                self.spawn_fetch_polls(tab);
            }
            PollsAction::SwitchTab(tab) => {
                if let CurrentScreen::Polls(ref mut screen) = self.screen {
                    screen.set_loading(tab);
                }
                self.last_tab = tab;
                self.spawn_fetch_polls(tab);
            }
            PollsAction::NewPoll => {
                self.screen = CurrentScreen::Create(CreatePollScreen::new());
            }
            PollsAction::Logout => {
                self.session.logout().await;
                self.state = AppState::Auth;
                self.screen = CurrentScreen::Login(LoginScreen::new());
            }
            PollsAction::Select(poll) => self.handle_poll_selected(poll).await,
        }
        EventResult::Continue
    }

    async fn handle_poll_selected(&mut self, poll: Poll) {
        match self.last_tab {
            PollsTab::Open => {
                let poll_id = poll.id;
                self.screen = CurrentScreen::Vote(VoteScreen::new(poll));
                self.spawn_fetch_options(poll_id);
            }
            PollsTab::Past => {
                let poll_id = poll.id;
                self.screen = CurrentScreen::Results(ResultsScreen::new(poll));
                self.spawn_fetch_results(poll_id);
            }
            PollsTab::Mine => self.handle_close_poll(poll.id).await,
        }
    }

    async fn handle_close_poll(&mut self, poll_id: PollId) {
        let Some((token, user_id)) = self.credentials() else {
            return;
        };

        match self.poll_data.close_poll(&token, poll_id, user_id).await {
            Ok(()) => {
                info!(%poll_id, "Poll closed");
                self.notifications.success("Poll was ended successfully");
                if let CurrentScreen::Polls(ref mut screen) = self.screen {
                    screen.set_loading(PollsTab::Mine);
                }
                self.spawn_fetch_polls(PollsTab::Mine);
            }
            Err(e) => {
                error!(error = %e, %poll_id, "Failed to close poll");
                self.notifications.error(e.to_string());
            }
        }
    }

    async fn handle_vote_action(&mut self, action: VoteAction) -> EventResult {
        match action {
            VoteAction::None => {}
            VoteAction::Back => self.enter_polls(self.last_tab),
            VoteAction::Submit(option_id) => {
                let Some((token, user_id)) = self.credentials() else {
                    return EventResult::Continue;
                };

                let poll_id = if let CurrentScreen::Vote(ref mut screen) = self.screen {
                    screen.set_submitting(true);
                    screen.poll_id()
                } else {
                    return EventResult::Continue;
                };

                match self
                    .poll_data
                    .submit_vote(&token, user_id, poll_id, option_id)
                    .await
                {
                    Ok(message) => {
                        info!(%poll_id, %option_id, "Vote submitted");
                        self.notifications.success(message);
                    }
                    Err(e) => {
                        error!(error = %e, %poll_id, "Failed to submit vote");
                        self.notifications.error(e.to_string());
                    }
                }

                if let CurrentScreen::Vote(ref mut screen) = self.screen {
                    screen.set_submitting(false);
                }
            }
        }
        EventResult::Continue
    }

    fn handle_results_action(&mut self, action: ResultsAction) -> EventResult {
        match action {
            ResultsAction::None => {}
            ResultsAction::Back => self.enter_polls(self.last_tab),
        }
        EventResult::Continue
    }

    async fn handle_create_action(&mut self, action: CreateAction) -> EventResult {
        match action {
            CreateAction::None => {}
            CreateAction::Back => self.enter_polls(self.last_tab),
            CreateAction::Submit(new_poll) => {
                let Some((token, user_id)) = self.credentials() else {
                    return EventResult::Continue;
                };

                if let CurrentScreen::Create(ref mut screen) = self.screen {
                    screen.set_submitting(true);
                }

                match self.poll_data.create_poll(&token, user_id, &new_poll).await {
                    Ok(message) => {
                        info!(title = %new_poll.title, "Poll created");
                        self.notifications.success(message);
                        self.enter_polls(PollsTab::Mine);
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to create poll");
                        self.notifications.error(e.to_string());
                        if let CurrentScreen::Create(ref mut screen) = self.screen {
                            screen.set_submitting(false);
                        }
                    }
                }
            }
        }
        EventResult::Continue
    }

    /// Replaces the current screen with the poll list and starts a fetch.
    fn enter_polls(&mut self, tab: PollsTab) {
        let viewer = self
            .session
            .current_identity()
            .map_or_else(String::new, |identity| identity.name().to_string());

        let mut screen = PollsScreen::new(viewer);
        screen.set_loading(tab);
        self.screen = CurrentScreen::Polls(screen);
        self.state = AppState::Browse;
        self.last_tab = tab;
        self.spawn_fetch_polls(tab);
    }

    fn credentials(&self) -> Option<(AuthToken, i64)> {
        let token = self.session.auth_token();
        let user_id = self.session.current_identity().map(Identity::id);
        match (token, user_id) {
            (Some(token), Some(user_id)) => Some((token, user_id)),
            _ => {
                warn!("No credentials available for poll service request");
                None
            }
        }
    }

    fn spawn_fetch_polls(&self, tab: PollsTab) {
        let Some((token, user_id)) = self.credentials() else {
            return;
        };

        // The open and past tabs list everyone's polls; the mine tab asks
        // the service to scope by owner.
        let scope_user = match tab {
            PollsTab::Mine => user_id,
            PollsTab::Open | PollsTab::Past => 0,
        };

        let data = self.poll_data.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            match data.fetch_polls(&token, scope_user).await {
                Ok(polls) => {
                    let polls: Vec<Poll> = polls
                        .into_iter()
                        .filter(|poll| match tab {
                            PollsTab::Open | PollsTab::Mine => poll.is_open(),
                            PollsTab::Past => !poll.is_open(),
                        })
                        .collect();
                    debug!(count = polls.len(), ?tab, "Polls loaded");
                    let _ = tx.send(Action::PollsLoaded { tab, polls });
                }
                Err(e) => {
                    warn!(error = %e, ?tab, "Failed to load polls");
                    let _ = tx.send(Action::PollsFailed {
                        tab,
                        message: e.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_fetch_options(&self, poll_id: PollId) {
        let Some((token, _)) = self.credentials() else {
            return;
        };

        let data = self.poll_data.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            match data.fetch_options(&token, poll_id).await {
                Ok(options) => {
                    debug!(%poll_id, count = options.len(), "Options loaded");
                    let _ = tx.send(Action::OptionsLoaded { poll_id, options });
                }
                Err(e) => {
                    warn!(error = %e, %poll_id, "Failed to load options");
                    let _ = tx.send(Action::OptionsFailed {
                        poll_id,
                        message: e.to_string(),
                    });
                }
            }
        });
    }

    /// Options and votes have no ordering dependency; fetch them
    /// concurrently and aggregate once both are in.
    fn spawn_fetch_results(&self, poll_id: PollId) {
        let Some((token, user_id)) = self.credentials() else {
            return;
        };

        let data = self.poll_data.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let (options, votes) = tokio::join!(
                data.fetch_options(&token, poll_id),
                data.fetch_votes(&token, poll_id, user_id),
            );

            match (options, votes) {
                (Ok(options), Ok(votes)) => {
                    let result = aggregate(&votes);
                    debug!(%poll_id, total = result.total_votes, "Results aggregated");
                    let _ = tx.send(Action::ResultsLoaded {
                        poll_id,
                        options,
                        result,
                    });
                }
                (Err(e), _) | (_, Err(e)) => {
                    warn!(error = %e, %poll_id, "Failed to load results");
                    let _ = tx.send(Action::ResultsFailed {
                        poll_id,
                        message: e.to_string(),
                    });
                }
            }
        });
    }

    /// Applies an async fetch result. Every screen setter re-checks the
    /// tab or poll id, so a result for a view the user already left is
    /// dropped instead of being applied to stale state.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::PollsLoaded { tab, polls } => {
                if let CurrentScreen::Polls(ref mut screen) = self.screen {
                    screen.set_polls(tab, polls);
                } else {
                    debug!(?tab, "Discarding poll list for a dismissed screen");
                }
            }
            Action::PollsFailed { tab, message } => {
                if let CurrentScreen::Polls(ref mut screen) = self.screen {
                    screen.set_error(tab, message);
                }
            }
            Action::OptionsLoaded { poll_id, options } => {
                if let CurrentScreen::Vote(ref mut screen) = self.screen {
                    screen.set_options(poll_id, options);
                } else {
                    debug!(%poll_id, "Discarding options for a dismissed screen");
                }
            }
            Action::OptionsFailed { poll_id, message } => {
                if let CurrentScreen::Vote(ref mut screen) = self.screen {
                    screen.set_error(poll_id, message);
                }
            }
            Action::ResultsLoaded {
                poll_id,
                options,
                result,
            } => {
                if let CurrentScreen::Results(ref mut screen) = self.screen {
                    screen.set_results(poll_id, options, result);
                } else {
                    debug!(%poll_id, "Discarding results for a dismissed screen");
                }
            }
            Action::ResultsFailed { poll_id, message } => {
                if let CurrentScreen::Results(ref mut screen) = self.screen {
                    screen.set_error(poll_id, message);
                }
            }
        }
    }

    fn login_error_message(error: &AuthError) -> String {
        match error {
            AuthError::Rejected { message } => message.clone(),
            AuthError::NetworkError { message } => format!("Network error: {message}"),
            AuthError::TokenDecodeFailed { .. } | AuthError::InvalidTokenFormat { .. } => {
                "The auth service returned an unusable token.".to_string()
            }
            _ => error.to_string(),
        }
    }
}
