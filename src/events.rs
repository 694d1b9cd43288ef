/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, SLIDER_STEP};

/// What a single key press means to the control panel
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Decrease,
    Increase,
    Update,
    Reset,
    Unlock,
    Activate,
}

/// Map a key to an action. `l` is only "increase"; unlock lives on `o` so the
/// two never collide.
pub fn classify_key(key_event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, kind, .. } = key_event;
    if kind == KeyEventKind::Release {
        return None;
    }
    let action = match (code, modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('q' | 'Q'), _) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::MoveUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::MoveDown,
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Action::Decrease,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::Increase,
        (KeyCode::Char('u' | 'U'), _) => Action::Update,
        (KeyCode::Char('r' | 'R'), _) => Action::Reset,
        (KeyCode::Char('o' | 'O'), _) => Action::Unlock,
        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => Action::Activate,
        _ => return None,
    };
    Some(action)
}

/// Apply one action. Returns true when the loop should stop.
pub fn apply_action(app: &mut App, action: Action) -> bool {
    match action {
        Action::Quit => return true,
        Action::MoveUp => app.move_selection(-1),
        Action::MoveDown => app.move_selection(1),
        Action::Decrease => app.change_slider(-SLIDER_STEP),
        Action::Increase => app.change_slider(SLIDER_STEP),
        Action::Update => app.do_update(),
        Action::Reset => app.do_reset(),
        Action::Unlock => app.do_unlock(),
        Action::Activate => app.activate_current(),
    }
    false
}

/// Main key handler. Unknown keys are ignored.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> bool {
    match classify_key(key_event) {
        Some(action) => apply_action(app, action),
        None => false,
    }
}

/// Anything that is not a key (resize, focus, mouse) only triggers a redraw.
pub fn handle_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key_event) => handle_key_event(app, key_event),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Control;
    use crate::test_utils::{app_with_mock, fallback_app, mock_with_fans};
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_classify_bindings() {
        let cases = [
            (KeyCode::Char('q'), Action::Quit),
            (KeyCode::Char('Q'), Action::Quit),
            (KeyCode::Esc, Action::Quit),
            (KeyCode::Up, Action::MoveUp),
            (KeyCode::Char('k'), Action::MoveUp),
            (KeyCode::Down, Action::MoveDown),
            (KeyCode::Char('j'), Action::MoveDown),
            (KeyCode::Left, Action::Decrease),
            (KeyCode::Char('h'), Action::Decrease),
            (KeyCode::Right, Action::Increase),
            (KeyCode::Char('l'), Action::Increase),
            (KeyCode::Char('u'), Action::Update),
            (KeyCode::Char('U'), Action::Update),
            (KeyCode::Char('r'), Action::Reset),
            (KeyCode::Char('R'), Action::Reset),
            (KeyCode::Char('o'), Action::Unlock),
            (KeyCode::Char('O'), Action::Unlock),
            (KeyCode::Enter, Action::Activate),
            (KeyCode::Char(' '), Action::Activate),
        ];
        for (code, expected) in cases {
            assert_eq!(classify_key(key(code)), Some(expected), "{:?}", code);
        }
    }

    #[test]
    fn test_capital_l_is_not_unlock() {
        assert_ne!(classify_key(key(KeyCode::Char('L'))), Some(Action::Unlock));
        assert_eq!(classify_key(key(KeyCode::Char('l'))), Some(Action::Increase));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify_key(ev), Some(Action::Quit));
        assert_eq!(classify_key(key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let ev = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(classify_key(ev), None);
    }

    #[test]
    fn test_unknown_keys_do_nothing() {
        let mut app = fallback_app();
        for code in [KeyCode::Char('z'), KeyCode::Tab, KeyCode::F(5), KeyCode::Char('L')] {
            assert!(!handle_key_event(&mut app, key(code)));
        }
        assert_eq!(app.selected_index(), 0);
        assert_eq!(app.fans(), &[35; 8]);
    }

    #[test]
    fn test_quit_returns_true() {
        let mut app = fallback_app();
        assert!(handle_key_event(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_navigation_and_adjust() {
        let mut app = app_with_mock(mock_with_fans(vec![50, 50]));
        for _ in 0..4 {
            handle_key_event(&mut app, key(KeyCode::Down));
        }
        assert_eq!(app.selected_control(), Control::Fan(0));
        handle_key_event(&mut app, key(KeyCode::Right));
        handle_key_event(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.fans(), &[60, 50]);
        handle_key_event(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.fans(), &[55, 50]);
        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.selected_control(), Control::Preset(crate::controls::Preset::Turbo));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.fans(), &[80, 80]);
        handle_key_event(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.fans(), &[50, 50]);
    }

    #[test]
    fn test_non_key_events_only_redraw() {
        let mut app = fallback_app();
        assert!(!handle_event(&mut app, Event::Resize(80, 24)));
        assert!(!handle_event(&mut app, Event::FocusGained));
        assert_eq!(app.selected_index(), 0);
    }
}
