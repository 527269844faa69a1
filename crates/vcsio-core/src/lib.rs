//! VCS.io Core
//!
//! Page controller for the project site: owns the document, the active tab
//! and the live scrollspy observers. Host events arrive as [`PageEvent`]
//! values; every state change happens inside [`PageController::dispatch`].

mod config;
mod controller;
mod error;
mod event;
mod state;
mod timer;

pub use config::Config;
pub use controller::PageController;
pub use error::CoreError;
pub use event::PageEvent;
pub use state::PageControllerState;
pub use timer::{TimerAction, Timers};

// Re-export the component crates
pub use vcsio_dom::{Document, DomError, ElementId, Viewport};
pub use vcsio_loader::{
    ContentLoader, DirectoryFragmentSource, FetchError, FragmentSource, HttpFragmentSource,
    LoadOutcome, StaticFragmentSource, Typesetter,
};
pub use vcsio_navigation::{ApiNav, Hooks, NavSettings, NavigationError, PaperNav};
pub use vcsio_tabs::{LoadTicket, TabError, TabKind};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
