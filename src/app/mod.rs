mod core;
mod event_bus;
mod event_loop;
mod input_ops;
mod policy;
mod state;
pub(crate) mod terminal_session;
mod view_ops;


pub use core::{App, InteractionSubsystem, PaletteSubsystem};
pub(crate) use policy::recover_forward;
pub use state::{AppState, Mode, PaletteRequest, StatusState};
