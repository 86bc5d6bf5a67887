//! Request-handling building blocks shared by the application and its route groups.

mod blueprint;
mod state;

pub use blueprint::{Blueprint, BlueprintError, BlueprintRegistry};
pub use state::{AppState, AppStateInner};
