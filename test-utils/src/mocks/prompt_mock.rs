use std::sync::Mutex;

use telemetry_common::{RawConfig, UserPrompt};

type EditFn = Box<dyn Fn(&RawConfig) -> Option<RawConfig> + Send + Sync>;

/// Prompt that answers the configuration form with a fixed edit and records alerts.
pub struct PromptMock {
    edit: EditFn,
    forms_shown: Mutex<Vec<RawConfig>>,
    alerts: Mutex<Vec<String>>,
}

impl PromptMock {
    /// Accepts the form with the values shown.
    pub fn accepting() -> Self {
        Self::editing(|current| Some(current.clone()))
    }

    /// Cancels the form.
    pub fn cancelling() -> Self {
        Self::editing(|_| None)
    }

    pub fn editing<F>(edit: F) -> Self
    where
        F: Fn(&RawConfig) -> Option<RawConfig> + Send + Sync + 'static,
    {
        Self {
            edit: Box::new(edit),
            forms_shown: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn forms_shown(&self) -> Vec<RawConfig> {
        self.forms_shown.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl UserPrompt for PromptMock {
    fn edit_config(&self, current: &RawConfig) -> Option<RawConfig> {
        self.forms_shown.lock().unwrap().push(current.clone());
        (self.edit)(current)
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
