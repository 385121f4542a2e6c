use super::*;
use crossterm::event::KeyEventState;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

#[test]
fn maps_printable_and_control_keys() {
    assert_eq!(
        map_key(press(KeyCode::Char(' '), KeyModifiers::NONE)),
        Some(Key::Char(' '))
    );
    assert_eq!(
        map_key(press(KeyCode::Char('q'), KeyModifiers::NONE)),
        Some(Key::Char('q'))
    );
    assert_eq!(
        map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Key::Interrupt)
    );
    assert_eq!(
        map_key(press(KeyCode::Esc, KeyModifiers::NONE)),
        Some(Key::Esc)
    );
    assert_eq!(
        map_key(press(KeyCode::F(5), KeyModifiers::NONE)),
        Some(Key::Other)
    );
}

#[test]
fn ignores_releases_and_repeats() {
    let mut ev = press(KeyCode::Char('q'), KeyModifiers::NONE);
    ev.kind = KeyEventKind::Release;
    assert_eq!(map_key(ev), None);
    ev.kind = KeyEventKind::Repeat;
    assert_eq!(map_key(ev), None);
}
