//! UI screens.

mod app;
mod create_screen;
mod login_screen;
mod notification_popup;
mod polls_screen;
mod results_screen;
mod vote_screen;

pub use app::App;
pub use create_screen::{CreateAction, CreatePollScreen};
pub use login_screen::{LoginAction, LoginMode, LoginScreen, LoginState};
pub use notification_popup::NotificationPopup;
pub use polls_screen::{PollsAction, PollsScreen, PollsTab};
pub use results_screen::{ResultsAction, ResultsScreen};
pub use vote_screen::{VoteAction, VoteScreen};
