//! Agent domain module
//!
//! Contains the per-session counters maintained by the turn loop.

pub mod state;

pub use state::{AgentLimits, AgentState, PendingApproval};
