//! Survey Flow — linear survey wizard core.
//!
//! The crate owns two things: the stage-transition state machine that walks
//! a user through the fixed screen sequence (landing → t-shirt selection →
//! preferences intro → questions → registration intro → registration →
//! completed), and the best-effort reporting client that pushes each step's
//! data to the remote collection endpoint as the user progresses.
//!
//! Rendering is the embedding host's job; the controller only answers
//! "which view should be on screen right now" via [`flow::View`].

pub mod config;
pub mod error;
pub mod flow;
pub mod monitor;
pub mod report;
pub mod session;
