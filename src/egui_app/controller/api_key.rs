use super::EguiController;
use crate::egui_app::ui::style::StatusTone;

const API_KEY_PAGE_URL: &str = "https://aistudio.google.com/app/apikey";

impl EguiController {
    /// Stored key, if the key store is reachable and holds one.
    pub(super) fn stored_api_key(&self) -> Option<String> {
        let store = self.key_store.as_ref()?;
        match store.get() {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(error = %err, "API key read failed");
                None
            }
        }
    }

    /// Key for an assist call, or `None` after opening the entry modal.
    pub(super) fn require_api_key(&mut self) -> Option<String> {
        match self.stored_api_key() {
            Some(key) => Some(key),
            None => {
                self.open_api_key_modal();
                self.set_status("Set a Gemini API key to use AI features", StatusTone::Warning);
                None
            }
        }
    }

    pub fn open_api_key_modal(&mut self) {
        let has_key = self.stored_api_key().is_some();
        self.ui.api_key.open_for_entry(has_key);
    }

    pub fn close_api_key_modal(&mut self) {
        self.ui.api_key.close();
    }

    /// Persist the key typed into the modal.
    pub fn save_api_key(&mut self) {
        let key = self.ui.api_key.input.trim().to_string();
        if key.is_empty() {
            return;
        }
        let Some(store) = self.key_store.as_ref() else {
            self.ui.api_key.last_error = Some("API key storage is unavailable".to_string());
            return;
        };
        match store.set(&key) {
            Ok(()) => {
                self.ui.api_key.close();
                self.ui.api_key.has_key = true;
                self.set_status("API key saved", StatusTone::Success);
            }
            Err(err) => {
                tracing::warn!(error = %err, "API key save failed");
                self.ui.api_key.last_error = Some(err.to_string());
            }
        }
    }

    /// Forget the stored key.
    pub fn remove_api_key(&mut self) {
        let Some(store) = self.key_store.as_ref() else {
            return;
        };
        match store.delete() {
            Ok(()) => {
                self.ui.api_key.has_key = false;
                self.ui.api_key.close();
                self.set_status("API key removed", StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!(error = %err, "API key delete failed");
                self.ui.api_key.last_error = Some(err.to_string());
            }
        }
    }

    /// Open the provider console where keys are issued.
    pub fn open_api_key_page(&mut self) {
        if let Err(err) = open::that(API_KEY_PAGE_URL) {
            self.set_status(format!("Could not open browser: {err}"), StatusTone::Warning);
        }
    }
}
