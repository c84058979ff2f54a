//! The four-step form as an explicit state machine.
//!
//! [`reduce`] is a pure transition function; [`FormController`] owns the
//! state and performs the storage and export side effects.

pub mod controller;
pub mod reducer;
pub mod state;

pub use controller::FormController;
pub use reducer::{FlowEffect, FormAction, Transition, reduce};
pub use state::{FormState, Notice, NoticeKind};
