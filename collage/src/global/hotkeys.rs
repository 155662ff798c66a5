use crate::actions;

const DOCUMENTATION: &str = r#"# Collage hotkeys. You may edit this file, but be aware that formatting and comments will not
# be preserved, and all keys and values are case sensitive.

# See `EditorCommand` for available commands, specified here in [brackets].
# Keyboard hotkeys, specified by the "keyboard" field of a command, are case-sensitive and written `[ctrl+][alt+][shift+]<key code>`.
# Key codes are named like `KeyA`, `Digit1`, `Escape`, `PageUp`, `ArrowLeft`.
# Each command may have many hotkeys associated with it, but each hotkey should only be used at most once.

# Examples:
# [Undo]
# keyboard = ["ctrl+KeyZ"]
# [Redo]
# keyboard = ["ctrl+KeyY", "ctrl+shift+KeyZ"]

"#;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

pub struct Hotkeys {
    failed_to_load: bool,
    pub actions_to_keys: actions::hotkeys::ActionsToKeys,
    pub keys_to_actions: actions::hotkeys::KeysToActions,
}
impl Hotkeys {
    const FILENAME: &'static str = "hotkeys.toml";
    /// Shared global hotkeys, saved and loaded from user preferences.
    /// (Or defaulted, if unavailable for some reason)
    #[must_use]
    pub fn get() -> &'static Self {
        static GLOBAL_HOTKEYS: std::sync::OnceLock<Hotkeys> = std::sync::OnceLock::new();

        GLOBAL_HOTKEYS.get_or_init(|| {
            let mut dir = preferences_dir();
            match dir.as_mut() {
                None => Self::no_path(),
                Some(dir) => {
                    dir.push(Self::FILENAME);
                    Self::load_or_default(dir)
                }
            }
        })
    }
    #[must_use]
    pub fn no_path() -> Self {
        log::warn!("Hotkeys weren't available, defaulting.");
        let mut defaults = Self::defaults();
        defaults.failed_to_load = true;
        defaults
    }
    /// The built-in bindings.
    #[must_use]
    pub fn defaults() -> Self {
        use actions::hotkeys::{ActionsToKeys, KeysToActions};
        let default = ActionsToKeys::default();
        // Default action map is reversable - this is assured by the default impl when debugging.
        let reverse = KeysToActions::try_from(&default).unwrap_or_else(|e| {
            log::error!("Default hotkeys are inconsistent: {e}");
            std::process::abort()
        });

        Self {
            failed_to_load: false,
            keys_to_actions: reverse,
            actions_to_keys: default,
        }
    }
    #[must_use]
    fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(hotkeys) => hotkeys,
            Err(e) => {
                log::warn!("Failed to load hotkeys from {path:?}: {e:#}");
                Self::no_path()
            }
        }
    }
    /// Read and validate a hotkey file.
    /// # Errors
    /// The file can't be read, isn't valid, or binds one key to several commands.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        use actions::hotkeys::{ActionsToKeys, KeysToActions};
        let mappings: anyhow::Result<(ActionsToKeys, KeysToActions)> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            let actions_to_keys : ActionsToKeys = toml::from_str(&string)?;
            let keys_to_actions : KeysToActions = (&actions_to_keys).try_into()?;

            Ok((actions_to_keys,keys_to_actions))
        };
        let (actions_to_keys, keys_to_actions) = mappings?;
        Ok(Self {
            failed_to_load: false,
            actions_to_keys,
            keys_to_actions,
        })
    }
    /// Return true if loading user's settings failed.
    #[must_use]
    pub fn did_fail_to_load(&self) -> bool {
        self.failed_to_load
    }
    /// Write the bindings to the user's preferences.
    /// # Errors
    /// No preferences directory, or writing failed.
    pub fn save(&self) -> anyhow::Result<()> {
        let mut preferences =
            preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
        // Explicity do *not* create recursively. If not found, the user probably has a good reason.
        // Ignore errors (could already exist). Any real errors will be emitted by file access below.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        self.save_to(&preferences)
    }
    /// # Errors
    /// Writing failed.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let mut string = toml::ser::to_string_pretty(&self.actions_to_keys)?;
        // Prefix some documentation.
        string = DOCUMENTATION.to_owned() + &string;
        std::fs::write(path, string)?;
        Ok(())
    }
}
