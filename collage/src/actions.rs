//! # Actions API
//!
//! Editor commands as seen by the input layer, and the hotkeys bound to them.

pub mod hotkeys;

pub use collage_core::editor::EditorCommand as Action;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionEvent {
    Press,
    Release,
}

/// Forward a key event to the editor, after mapping it through the hotkeys.
/// Returns whether the editor did anything with it.
pub fn dispatch(
    editor: &mut collage_core::editor::Editor,
    keys: &hotkeys::KeysToActions,
    key: hotkeys::KeyboardHotkey,
    event: ActionEvent,
) -> bool {
    let Some(action) = keys.resolve(key) else {
        log::debug!("{key} is not bound");
        return false;
    };
    log::trace!("{key} -> {} {event:?}", action.as_ref());
    match event {
        ActionEvent::Press => editor.key_down(action),
        ActionEvent::Release => editor.key_up(action),
    }
}
