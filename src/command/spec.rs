use super::types::{ArgKind, ArgSpec, CommandSpec};

const NO_ARGS: [ArgSpec; 0] = [];
const ARGS_GOTO_ANG: [ArgSpec; 1] = [ArgSpec {
    name: "ang",
    kind: ArgKind::U32,
    required: true,
}];
const ARGS_BANI: [ArgSpec; 1] = [ArgSpec {
    name: "name",
    kind: ArgKind::String,
    required: false,
}];
const ARGS_OPEN_PALETTE: [ArgSpec; 2] = [
    ArgSpec {
        name: "kind",
        kind: ArgKind::String,
        required: true,
    },
    ArgSpec {
        name: "seed",
        kind: ArgKind::String,
        required: false,
    },
];

const COMMAND_SPECS: [CommandSpec; 11] = [
    CommandSpec {
        id: "next",
        title: "Next Verse",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "previous",
        title: "Previous Verse",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "pause",
        title: "Pause Auto-Advance",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "resume",
        title: "Resume Auto-Advance",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "toggle-pause",
        title: "Toggle Auto-Advance",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "goto-ang",
        title: "Go to Ang",
        args: &ARGS_GOTO_ANG,
    },
    CommandSpec {
        id: "bani",
        title: "Open Bani",
        args: &ARGS_BANI,
    },
    CommandSpec {
        id: "open-palette",
        title: "Open Palette",
        args: &ARGS_OPEN_PALETTE,
    },
    CommandSpec {
        id: "close-palette",
        title: "Close Palette",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "cancel",
        title: "Cancel",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "quit",
        title: "Quit",
        args: &NO_ARGS,
    },
];

pub fn command_registry() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

pub fn all_command_specs() -> Vec<CommandSpec> {
    COMMAND_SPECS.to_vec()
}

pub fn find_command_spec(id: &str) -> Option<CommandSpec> {
    command_registry().iter().copied().find(|spec| spec.id == id)
}
