use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    NextField,
    Submit,
    Backspace,
    Up,
    Down,
    Input(char),
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return AppAction::Quit;
        }
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        // Plain chars route through Input; the app decides what they mean
        // per mode, so typing a name never triggers a shortcut.
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut event = KeyEvent::new(code, modifiers);
        event.kind = KeyEventKind::Press;
        event
    }

    #[test]
    fn ctrl_c_always_quits() {
        let action = map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, AppAction::Quit);
    }

    #[test]
    fn plain_letters_are_input_not_shortcuts() {
        assert_eq!(
            map_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            AppAction::Input('q')
        );
        assert_eq!(
            map_key(key(KeyCode::Char('d'), KeyModifiers::NONE)),
            AppAction::Input('d')
        );
    }

    #[test]
    fn navigation_keys_map_to_actions() {
        assert_eq!(map_key(key(KeyCode::Esc, KeyModifiers::NONE)), AppAction::Cancel);
        assert_eq!(map_key(key(KeyCode::Tab, KeyModifiers::NONE)), AppAction::NextField);
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), AppAction::Submit);
        assert_eq!(map_key(key(KeyCode::Up, KeyModifiers::NONE)), AppAction::Up);
        assert_eq!(map_key(key(KeyCode::F(5), KeyModifiers::NONE)), AppAction::None);
    }
}
