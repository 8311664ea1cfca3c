mod bani;
mod command;

pub use bani::BaniPaletteProvider;
pub use command::CommandPaletteProvider;
