mod actions;
mod gate;
mod home;
mod login;
mod notice;
mod planner;
mod register;
mod state;
mod study;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use actions::{ActionOutcome, BoardAction, apply_board_action, outcome_of, use_board_dispatch};
pub use gate::{RequireSession, session_changed};
pub use home::HomeView;
pub use login::LoginView;
pub use notice::NoticeBanner;
pub use planner::PlannerView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study::StudyView;
