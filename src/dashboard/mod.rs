//! Dashboard poller and renderer
//!
//! - [`Poller`] keeps the current snapshot fresh on a fixed interval
//! - [`DrillDown`] fetches one server's history on demand
//! - [`view`] maps records to rows without side effects
//!
//! Fetch failures never reach the view: they are logged and the last good
//! snapshot stays on screen.

pub mod command;
pub mod drilldown;
pub mod poller;
pub mod state;
pub mod view;

pub use command::{DashboardCommand, Selection};
pub use drilldown::{DrillDown, HistoryPanel};
pub use poller::Poller;
pub use state::DashboardState;
pub use view::{
    format_last_updated, render_current, render_history, CurrentRow, HistoryRow, StatusBadge,
};
