use super::library_preference::LibraryPreference;
use serde::Serialize;
use serde::Deserialize;

/// Represents all user prefs. Intended for serving to clients, editing in the settings screen, etc.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
pub struct UserPrefs {
    library_preference: LibraryPreference,
}

impl UserPrefs {
    pub fn library_preference(&self) -> &LibraryPreference {
        &self.library_preference
    }
}
