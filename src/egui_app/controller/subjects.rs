use super::EguiController;
use super::jobs::{SubjectCreateResult, SubjectsLoadResult};
use crate::egui_app::ui::style::StatusTone;
use crate::school::{Subject, SubjectId};

impl EguiController {
    pub(super) fn apply_subjects_loaded(&mut self, message: SubjectsLoadResult) {
        if !self.jobs.subjects_load_matches(&message.class_id) {
            return;
        }
        self.jobs.clear_subjects_load();
        self.ui.subjects.loading = false;
        match message.result {
            Ok(subjects) => {
                self.subjects = subjects;
                self.refresh_subjects_ui();
                self.set_status(
                    format!("Loaded {} subjects", self.subjects.len()),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "subject list load failed");
                self.set_status(format!("Failed to load subjects: {err}"), StatusTone::Error);
            }
        }
    }

    /// Change the selected subject and reload its items.
    pub fn select_subject(&mut self, id: Option<SubjectId>) {
        self.selected_subject = id.clone();
        self.items.clear();
        self.refresh_subjects_ui();
        self.refresh_items_ui();
        match id {
            Some(subject_id) => {
                self.ui.items.loading = true;
                self.jobs.begin_items_load(self.school.clone(), subject_id);
            }
            None => {
                self.jobs.clear_items_load();
                self.ui.items.loading = false;
            }
        }
    }

    /// Create a subject from the sidebar input field.
    pub fn add_subject(&mut self) {
        let name = self.ui.subjects.name_input.trim().to_string();
        if name.is_empty() {
            return;
        }
        let Some(class_id) = self.selected_class.clone() else {
            self.set_status("Select a class before adding subjects", StatusTone::Warning);
            return;
        };
        if self.jobs.subject_create_in_progress {
            return;
        }
        self.ui.subjects.adding = true;
        self.set_status(format!("Adding subject {name}…"), StatusTone::Busy);
        self.jobs.begin_subject_create(self.school.clone(), class_id, name);
    }

    pub(super) fn apply_subject_created(&mut self, message: SubjectCreateResult) {
        self.jobs.clear_subject_create();
        self.ui.subjects.adding = false;
        if Some(&message.class_id) != self.selected_class.as_ref() {
            return;
        }
        match message.result {
            Ok(id) => {
                self.subjects.push(Subject {
                    id: id.clone(),
                    class_id: message.class_id,
                    name: message.name.clone(),
                });
                self.ui.subjects.name_input.clear();
                self.select_subject(Some(id));
                self.set_status(format!("Added subject {}", message.name), StatusTone::Success);
            }
            Err(err) => {
                tracing::warn!(error = %err, "subject create failed");
                self.set_status(format!("Failed to add subject: {err}"), StatusTone::Error);
            }
        }
    }
}
