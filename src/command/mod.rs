mod core;
mod dispatch;
mod parse;
mod spec;
mod types;

pub use dispatch::{CommandDispatchResult, dispatch, dispatch_advance};
pub use parse::parse_command_text;
pub use spec::{all_command_specs, command_registry, find_command_spec};
pub use types::{ActionId, ArgKind, ArgSpec, Command, CommandOutcome, CommandSpec};

pub(crate) use core::location_label;
