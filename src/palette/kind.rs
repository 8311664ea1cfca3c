#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    Command,
    Bani,
}

impl PaletteKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Bani => "bani",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "command" => Some(Self::Command),
            "bani" => Some(Self::Bani),
            _ => None,
        }
    }
}
