//! Controller bridging the school backend and assist client to the egui UI.

use crate::assist::{ApiKeyStore, AssistApi};
use crate::config::{self, AppConfig};
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::egui_app::view_model;
use crate::school::{ClassId, DskpItem, SchoolApi, SchoolClass, Subject, SubjectId};

mod api_key;
mod background_jobs;
mod classes;
mod items;
mod jobs;
mod subjects;
mod suggestions;

/// Maintains app state and bridges backend data to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    config: AppConfig,
    school: SchoolApi,
    assist: AssistApi,
    key_store: Option<ApiKeyStore>,
    classes: Vec<SchoolClass>,
    subjects: Vec<Subject>,
    items: Vec<DskpItem>,
    selected_class: Option<ClassId>,
    selected_subject: Option<SubjectId>,
    jobs: jobs::ControllerJobs,
}

impl EguiController {
    /// Create the controller from persisted configuration.
    pub fn new() -> Result<Self, String> {
        let config = config::load_or_default()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        let backend_url = config::normalize_base_url(&config.backend_base_url)
            .map_err(|err| format!("Invalid backend URL: {err}"))?;
        let assist_url = config::normalize_base_url(&config.assist_base_url)
            .map_err(|err| format!("Invalid AI endpoint URL: {err}"))?;
        let school = SchoolApi::new(backend_url);
        let assist = AssistApi::new(assist_url, config.assist_model.clone());
        let key_store = match ApiKeyStore::new() {
            Ok(store) => Some(store),
            Err(err) => {
                tracing::warn!(error = %err, "API key store unavailable");
                None
            }
        };
        Ok(Self {
            ui: UiState::default(),
            config,
            school,
            assist,
            key_store,
            classes: Vec::new(),
            subjects: Vec::new(),
            items: Vec::new(),
            selected_class: None,
            selected_subject: None,
            jobs: jobs::ControllerJobs::new(),
        })
    }

    /// Kick off the initial class fetch and seed the key hint.
    pub fn startup(&mut self) {
        self.ui.api_key.has_key = self.stored_api_key().is_some();
        if self.key_store.is_none() {
            self.set_status(
                "API key storage unavailable; AI features disabled",
                StatusTone::Warning,
            );
        }
        self.begin_classes_load();
    }

    /// Whether any worker thread may still deliver a message.
    pub fn has_background_work(&self) -> bool {
        self.jobs.any_in_flight()
    }

    pub(super) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = style::status_badge_label(tone).into();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }

    /// Persist full config, reporting a friendly status on failure.
    fn persist_config(&mut self, error_prefix: &str) {
        if let Err(err) = config::save(&self.config) {
            tracing::warn!(error = %err, "config save failed");
            self.set_status(format!("{error_prefix}: {err}"), StatusTone::Warning);
        }
    }

    fn current_class(&self) -> Option<&SchoolClass> {
        let selected = self.selected_class.as_ref()?;
        self.classes.iter().find(|class| &class.id == selected)
    }

    fn current_subject(&self) -> Option<&Subject> {
        let selected = self.selected_subject.as_ref()?;
        self.subjects.iter().find(|subject| &subject.id == selected)
    }

    fn refresh_classes_ui(&mut self) {
        self.ui.classes.rows = view_model::class_rows(&self.classes);
        self.ui.classes.selected = self.selected_class.clone();
    }

    fn refresh_subjects_ui(&mut self) {
        self.ui.subjects.rows =
            view_model::subject_rows(&self.subjects, self.selected_subject.as_ref());
    }

    fn refresh_items_ui(&mut self) {
        self.ui.items.subject_label = self.current_subject().map(|s| s.name.clone());
        self.ui.items.rows = view_model::item_rows(&self.items);
    }
}
