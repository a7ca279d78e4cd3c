//! Search module - request lifecycle and render plan.
//!
//! `state` holds the immutable snapshot and its transitions, `session`
//! sequences dispatched requests against that snapshot, and `view` derives
//! what the window should show from a snapshot.

pub mod session;
pub mod state;
pub mod view;

pub use session::{Resolution, SearchSession, SearchTicket};
pub use state::{SearchState, EMPTY_QUERY_MESSAGE, FETCH_FAILED_MESSAGE};
pub use view::{render_plan, ViewBlock};
