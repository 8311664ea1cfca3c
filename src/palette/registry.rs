use super::providers::{BaniPaletteProvider, CommandPaletteProvider};
use super::{PaletteKind, PaletteProvider};

pub struct PaletteRegistry {
    command: CommandPaletteProvider,
    bani: BaniPaletteProvider,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self {
            command: CommandPaletteProvider,
            bani: BaniPaletteProvider,
        }
    }
}

impl PaletteRegistry {
    pub fn get(&self, kind: PaletteKind) -> &dyn PaletteProvider {
        match kind {
            PaletteKind::Command => &self.command,
            PaletteKind::Bani => &self.bani,
        }
    }
}
