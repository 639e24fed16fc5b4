//! The five-step wizard: transition rules, the action service, export and
//! the shared view model.

pub mod export;
pub mod service;
pub mod state;
pub mod view;

pub use export::{build_export, export_json_pretty};
pub use service::WizardService;
pub use state::WizardSessionExt;
pub use view::SessionView;
