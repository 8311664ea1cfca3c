use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;
use crate::command::Command;
use crate::palette::PaletteKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, mode: Mode) -> Option<Command> {
    map_key_to_command_with_preset(key, mode, KeymapPreset::Default)
}

pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    mode: Mode,
    preset: KeymapPreset,
) -> Option<Command> {
    match mode {
        Mode::Normal => match preset {
            KeymapPreset::Default => map_normal_mode_key_default(key),
            KeymapPreset::Emacs => map_normal_mode_key_emacs(key),
        },
        Mode::Palette => None,
    }
}

fn open_palette(kind: PaletteKind) -> Option<Command> {
    Some(Command::OpenPalette { kind, seed: None })
}

fn map_normal_mode_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            // Raw mode delivers SIGINT as a key press.
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(':') => open_palette(PaletteKind::Command),
        KeyCode::Char('b') => open_palette(PaletteKind::Bani),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('j') => Some(Command::Next),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('k') => Some(Command::Previous),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn map_normal_mode_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('x') => open_palette(PaletteKind::Command),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') | KeyCode::Char('f') => Some(Command::Next),
            KeyCode::Char('p') | KeyCode::Char('b') => Some(Command::Previous),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => map_normal_mode_key_default(key),
        };
    }

    map_normal_mode_key_default(key)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::Mode;
    use crate::command::Command;
    use crate::palette::PaletteKind;

    use super::{KeymapPreset, map_key_to_command, map_key_to_command_with_preset};

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keymap_preset_parse_defaults_on_unknown_values() {
        assert_eq!(KeymapPreset::parse("default"), KeymapPreset::Default);
        assert_eq!(KeymapPreset::parse("emacs"), KeymapPreset::Emacs);
        assert_eq!(KeymapPreset::parse("vim"), KeymapPreset::Default);
    }

    #[test]
    fn default_preset_maps_navigation_and_pause() {
        assert_eq!(
            map_key_to_command(plain(KeyCode::Right), Mode::Normal),
            Some(Command::Next)
        );
        assert_eq!(
            map_key_to_command(plain(KeyCode::Char('h')), Mode::Normal),
            Some(Command::Previous)
        );
        assert_eq!(
            map_key_to_command(plain(KeyCode::Char(' ')), Mode::Normal),
            Some(Command::TogglePause)
        );
        assert_eq!(
            map_key_to_command(plain(KeyCode::Char('b')), Mode::Normal),
            Some(Command::OpenPalette {
                kind: PaletteKind::Bani,
                seed: None
            })
        );
    }

    #[test]
    fn quit_keys_include_escape_and_ctrl_c() {
        for key in [
            plain(KeyCode::Char('q')),
            plain(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(map_key_to_command(key, Mode::Normal), Some(Command::Quit));
        }
    }

    #[test]
    fn palette_mode_maps_nothing() {
        assert_eq!(
            map_key_to_command(plain(KeyCode::Char('q')), Mode::Palette),
            None
        );
    }

    #[test]
    fn emacs_preset_maps_ctrl_n_and_alt_x() {
        let next = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert_eq!(next, Some(Command::Next));

        let palette = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert!(matches!(palette, Some(Command::OpenPalette { .. })));

        let interrupt = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert_eq!(interrupt, Some(Command::Quit));
    }
}
