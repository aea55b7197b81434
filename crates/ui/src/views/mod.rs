mod builder;
mod quiz;
mod settings;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use builder::BuilderView;
pub use quiz::QuizView;
pub use settings::SettingsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
