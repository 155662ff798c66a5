use super::super::Action;
use super::{KeyCode, KeyboardHotkey};

pub const KEYBOARD: &[(Action, &[KeyboardHotkey])] = &[
    (Action::Translate, &[KeyboardHotkey::plain(KeyCode::KeyG)]),
    (Action::Scale, &[KeyboardHotkey::plain(KeyCode::KeyS)]),
    (Action::Cancel, &[KeyboardHotkey::plain(KeyCode::Escape)]),
    (
        Action::Delete,
        &[
            KeyboardHotkey::plain(KeyCode::Delete),
            KeyboardHotkey::plain(KeyCode::Backspace),
        ],
    ),
    (Action::Duplicate, &[KeyboardHotkey::ctrl(KeyCode::KeyD)]),
    (Action::LayerUp, &[KeyboardHotkey::plain(KeyCode::PageUp)]),
    (Action::LayerDown, &[KeyboardHotkey::plain(KeyCode::PageDown)]),
    (Action::LayerToTop, &[KeyboardHotkey::plain(KeyCode::Home)]),
    (Action::LayerToBottom, &[KeyboardHotkey::plain(KeyCode::End)]),
    (Action::Undo, &[KeyboardHotkey::ctrl(KeyCode::KeyZ)]),
    (
        Action::Redo,
        &[
            KeyboardHotkey::ctrl(KeyCode::KeyY),
            KeyboardHotkey {
                alt: false,
                ctrl: true,
                shift: true,
                key: KeyCode::KeyZ,
            },
        ],
    ),
    (Action::CopyWidth, &[KeyboardHotkey::plain(KeyCode::KeyW)]),
    (Action::CopyHeight, &[KeyboardHotkey::plain(KeyCode::KeyH)]),
    (Action::Paste, &[KeyboardHotkey::ctrl(KeyCode::KeyV)]),
];
