use crate::types::RawConfig;

/// Interaction with the person running the client.
pub trait UserPrompt {
    /// Presents `current` as an editable form. Returns None if the user cancels.
    fn edit_config(&self, current: &RawConfig) -> Option<RawConfig>;
    /// Shows a blocking message to the user.
    fn alert(&self, message: &str);
}
