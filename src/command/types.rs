use crate::palette::PaletteKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Pause,
    Resume,
    TogglePause,
    GotoAng {
        ang: u32,
    },
    LoadBani {
        name: String,
    },
    OpenPalette {
        kind: PaletteKind,
        seed: Option<String>,
    },
    ClosePalette,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    Next,
    Previous,
    Pause,
    Resume,
    TogglePause,
    GotoAng,
    LoadBani,
    OpenPalette,
    ClosePalette,
    Cancel,
    Quit,
    AutoAdvance,
    Startup,
    Input,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::TogglePause => "toggle-pause",
            Self::GotoAng => "goto-ang",
            Self::LoadBani => "bani",
            Self::OpenPalette => "open-palette",
            Self::ClosePalette => "close-palette",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
            Self::AutoAdvance => "auto-advance",
            Self::Startup => "startup",
            Self::Input => "input",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::Next => ActionId::Next,
            Self::Previous => ActionId::Previous,
            Self::Pause => ActionId::Pause,
            Self::Resume => ActionId::Resume,
            Self::TogglePause => ActionId::TogglePause,
            Self::GotoAng { .. } => ActionId::GotoAng,
            Self::LoadBani { .. } => ActionId::LoadBani,
            Self::OpenPalette { .. } => ActionId::OpenPalette,
            Self::ClosePalette => ActionId::ClosePalette,
            Self::Cancel => ActionId::Cancel,
            Self::Quit => ActionId::Quit,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    U32,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub args: &'static [ArgSpec],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}
