//! Collections of keyboard hotkeys.
//!
//! Actions can have potentially many hotkeys bound to them, and hotkeys can be bound to at most one action.
//! Mapping in both directions is useful, but for disk storage the one-to-many relation of Actions to keys is
//! easier to edit for the end user. Thus, the reverse many-to-one mapping of keys to actions will be built dynamically.

use std::sync::Arc;
mod defaults;

use super::Action;

/// Physical key names, spelled the same as the usual web/winit key codes.
#[derive(
    Hash,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Debug,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum KeyCode {
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Enter,
    Escape,
    Space,
    Tab,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug, Copy)]
pub struct KeyboardHotkey {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub key: KeyCode,
}
impl KeyboardHotkey {
    /// A hotkey with no modifiers.
    #[must_use]
    pub const fn plain(key: KeyCode) -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            key,
        }
    }
    #[must_use]
    pub const fn ctrl(key: KeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }
    /// Get an arbitrary score of how specific this key is.
    #[must_use]
    pub fn specificity(&self) -> u8 {
        u8::from(self.ctrl) + u8::from(self.alt) + u8::from(self.shift)
    }
}
impl serde::Serialize for KeyboardHotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Human-readable string form, same as the file syntax.
        serializer.collect_str(self)
    }
}
impl<'de> serde::Deserialize<'de> for KeyboardHotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // delegate to FromStr from a borrowed or owned string, depending on capabilities of deserializer.
        let str =
            <std::borrow::Cow<'de, str> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        str.parse().map_err(serde::de::Error::custom)
    }
}
/// Formatted correctly for [`std::str::FromStr`].
impl std::fmt::Display for KeyboardHotkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut components = smallvec::SmallVec::<[&str; 4]>::new();
        if self.ctrl {
            components.push("ctrl");
        }
        if self.alt {
            components.push("alt");
        }
        if self.shift {
            components.push("shift");
        };
        components.push(self.key.as_ref());
        f.write_str(&components.join("+"))
    }
}
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyboardHotkeyFromStrError {
    #[error("unrecognized key name {0:?}")]
    InvalidKeyName(String),
}
/// Parse from sytax `[ctrl+][alt+][shift+]<key name>`, case-sensitive.
impl std::str::FromStr for KeyboardHotkey {
    type Err = KeyboardHotkeyFromStrError;
    fn from_str(mut str: &str) -> Result<Self, Self::Err> {
        let mut take_if_has = |prefix: &str| -> bool {
            if let Some(new_str) = str.strip_prefix(prefix) {
                str = new_str;
                true
            } else {
                false
            }
        };
        let ctrl = take_if_has("ctrl+");
        let alt = take_if_has("alt+");
        let shift = take_if_has("shift+");
        // str now contains only the key name.
        let key = str
            .parse()
            .map_err(|_| KeyboardHotkeyFromStrError::InvalidKeyName(str.to_owned()))?;

        Ok(Self {
            ctrl,
            alt,
            shift,
            key,
        })
    }
}
/// The hotkeys bound to one action. Contained as Arc'd slices,
/// as it is not intended to change frequently.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct HotkeyCollection {
    pub keyboard: Option<Arc<[KeyboardHotkey]>>,
}
impl HotkeyCollection {
    pub fn iter(&self) -> impl Iterator<Item = KeyboardHotkey> + '_ {
        self.keyboard.iter().flat_map(|keys| keys.iter().copied())
    }
}
/// Maps each action onto potentially many hotkeys.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ActionsToKeys(hashbrown::HashMap<Action, HotkeyCollection>);
impl Default for ActionsToKeys {
    fn default() -> Self {
        let mut keys_map = hashbrown::HashMap::with_capacity(defaults::KEYBOARD.len());
        // Collect the keys from the defaults array
        for (action, keys) in defaults::KEYBOARD {
            keys_map.insert(
                *action,
                HotkeyCollection {
                    keyboard: Some((*keys).into()),
                },
            );
        }

        let new = Self(keys_map);
        // Make sure we didn't accidentally bind a single key twice
        // Would be nice if this was a static check.
        debug_assert!(TryInto::<KeysToActions>::try_into(&new).is_ok());
        new
    }
}
impl ActionsToKeys {
    pub fn keys_of(&self, action: Action) -> impl Iterator<Item = KeyboardHotkey> + '_ {
        self.0.get(&action).into_iter().flat_map(HotkeyCollection::iter)
    }
}

/// Derived from [`ActionsToKeys`], maps each hotkey onto at most one action.
pub struct KeysToActions(hashbrown::HashMap<KeyboardHotkey, Action>);
#[derive(thiserror::Error, Debug)]
pub enum KeysToActionsError {
    /// A single key was bound to multiple actions.
    /// Only the first two encountered (in arbitrary order) are reported.
    #[error("hotkey {key} used for more than one action: {actions:?}")]
    DuplicateBinding {
        key: KeyboardHotkey,
        actions: [Action; 2],
    },
}
impl TryFrom<&ActionsToKeys> for KeysToActions {
    type Error = KeysToActionsError;
    fn try_from(value: &ActionsToKeys) -> Result<Self, Self::Error> {
        let mut new = KeysToActions(hashbrown::HashMap::default());

        for (action, keys) in &value.0 {
            for key in keys.iter() {
                let old = new.0.insert(key, *action);
                // The slot wasn't empty!
                if let Some(old) = old {
                    return Err(KeysToActionsError::DuplicateBinding {
                        key,
                        actions: [*action, old],
                    });
                }
            }
        }

        Ok(new)
    }
}
impl KeysToActions {
    #[must_use]
    pub fn contains(&self, key: KeyboardHotkey) -> bool {
        self.0.contains_key(&key)
    }
    /// The action bound to exactly this key and modifier combination.
    #[must_use]
    pub fn action_of(&self, key: KeyboardHotkey) -> Option<Action> {
        self.0.get(&key).copied()
    }
    /// The action for a key press, falling back to the binding with the most modifiers that are all held.
    #[must_use]
    pub fn resolve(&self, key: KeyboardHotkey) -> Option<Action> {
        self.action_of(key).or_else(|| {
            self.0
                .iter()
                .filter(|(bound, _)| {
                    bound.key == key.key
                        && (!bound.ctrl || key.ctrl)
                        && (!bound.alt || key.alt)
                        && (!bound.shift || key.shift)
                })
                .max_by_key(|(bound, _)| bound.specificity())
                .map(|(_, action)| *action)
        })
    }
}
