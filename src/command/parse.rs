use crate::error::{AppError, AppResult};
use crate::nav::TOTAL_ANGS;
use crate::palette::PaletteKind;

use super::spec::find_command_spec;
use super::types::Command;

pub fn parse_command_text(input: &str) -> AppResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument("command must not be empty"));
    }

    let (id, args_text) = match trimmed.find(char::is_whitespace) {
        Some(index) => (&trimmed[..index], trimmed[index..].trim_start()),
        None => (trimmed, ""),
    };

    if find_command_spec(id).is_none() {
        return Err(AppError::invalid_argument(format!("unknown command: {id}")));
    }

    match id {
        "next" => parse_no_args(id, args_text, Command::Next),
        "previous" => parse_no_args(id, args_text, Command::Previous),
        "pause" => parse_no_args(id, args_text, Command::Pause),
        "resume" => parse_no_args(id, args_text, Command::Resume),
        "toggle-pause" => parse_no_args(id, args_text, Command::TogglePause),
        "goto-ang" => parse_goto_ang(args_text),
        "bani" => Ok(parse_bani(args_text)),
        "open-palette" => parse_open_palette(args_text),
        "close-palette" => parse_no_args(id, args_text, Command::ClosePalette),
        "cancel" => parse_no_args(id, args_text, Command::Cancel),
        "quit" => parse_no_args(id, args_text, Command::Quit),
        _ => Err(AppError::unsupported(
            "command parser is out of sync with registry",
        )),
    }
}

fn parse_no_args(id: &str, args_text: &str, cmd: Command) -> AppResult<Command> {
    if args_text.is_empty() {
        return Ok(cmd);
    }
    Err(AppError::invalid_argument(format!(
        "{id} does not accept arguments"
    )))
}

fn parse_goto_ang(args_text: &str) -> AppResult<Command> {
    let mut parts = args_text.split_whitespace();
    let Some(ang_text) = parts.next() else {
        return Err(AppError::invalid_argument(
            "goto-ang requires 1 argument: ang",
        ));
    };
    if parts.next().is_some() {
        return Err(AppError::invalid_argument(
            "goto-ang accepts exactly 1 argument",
        ));
    }

    let ang = ang_text
        .parse::<u32>()
        .map_err(|_| AppError::invalid_argument("goto-ang ang must be a positive integer"))?;
    if !(1..=TOTAL_ANGS).contains(&ang) {
        return Err(AppError::invalid_argument(format!(
            "ang must be within 1..={TOTAL_ANGS}"
        )));
    }

    Ok(Command::GotoAng { ang })
}

/// `bani` alone opens the catalog; `bani <name>` loads it directly.
fn parse_bani(args_text: &str) -> Command {
    let name = args_text.trim();
    if name.is_empty() {
        return Command::OpenPalette {
            kind: PaletteKind::Bani,
            seed: None,
        };
    }
    Command::LoadBani {
        name: name.to_string(),
    }
}

fn parse_open_palette(args_text: &str) -> AppResult<Command> {
    let trimmed = args_text.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument(
            "open-palette requires 1 argument: kind",
        ));
    }

    let (kind_text, seed) = match trimmed.find(char::is_whitespace) {
        Some(index) => {
            let kind = trimmed[..index].trim();
            let seed = trimmed[index..].trim_start();
            let seed = if seed.is_empty() {
                None
            } else {
                Some(seed.to_string())
            };
            (kind, seed)
        }
        None => (trimmed, None),
    };

    let kind =
        PaletteKind::parse(kind_text).ok_or(AppError::invalid_argument("unknown palette kind"))?;

    Ok(Command::OpenPalette { kind, seed })
}

#[cfg(test)]
mod tests {
    use super::parse_command_text;
    use crate::command::Command;
    use crate::error::AppError;
    use crate::palette::PaletteKind;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(
            parse_command_text("next").expect("parse should succeed"),
            Command::Next
        );
        assert_eq!(
            parse_command_text("  toggle-pause ").expect("parse should succeed"),
            Command::TogglePause
        );
        assert_eq!(
            parse_command_text("goto-ang 1430").expect("parse should succeed"),
            Command::GotoAng { ang: 1430 }
        );
    }

    #[test]
    fn goto_ang_rejects_out_of_range_and_garbage() {
        for input in ["goto-ang", "goto-ang 0", "goto-ang 1431", "goto-ang x", "goto-ang 1 2"] {
            let err = parse_command_text(input).expect_err(input);
            assert!(matches!(err, AppError::InvalidArgument(_)), "{input}");
        }
    }

    #[test]
    fn bani_without_name_opens_catalog() {
        assert_eq!(
            parse_command_text("bani").expect("parse should succeed"),
            Command::OpenPalette {
                kind: PaletteKind::Bani,
                seed: None,
            }
        );
        assert_eq!(
            parse_command_text("bani Kirtan Sohila").expect("parse should succeed"),
            Command::LoadBani {
                name: "Kirtan Sohila".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_ids_and_stray_arguments() {
        assert!(parse_command_text("").is_err());
        assert!(parse_command_text("zoom-in").is_err());
        assert!(parse_command_text("pause now").is_err());
        assert_eq!(
            parse_command_text("open-palette command").expect("parse should succeed"),
            Command::OpenPalette {
                kind: PaletteKind::Command,
                seed: None,
            }
        );
    }
}
