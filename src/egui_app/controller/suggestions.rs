use super::EguiController;
use super::jobs::{CommitResult, SuggestionsResult};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;
use crate::school::DskpDraft;

impl EguiController {
    /// Ask the model for SK/SP suggestions for the selected subject.
    pub fn request_suggestions(&mut self) {
        let Some(subject) = self.current_subject() else {
            return;
        };
        let subject_id = subject.id.clone();
        let subject_name = subject.name.clone();
        let Some(year) = self.current_class().map(|class| class.year.clone()) else {
            return;
        };
        if self.jobs.suggest_in_progress {
            return;
        }
        let Some(api_key) = self.require_api_key() else {
            return;
        };
        self.ui.suggestions.requesting = true;
        self.ui.suggestions.subject_label = subject_name.clone();
        self.ui.suggestions.year_label = year.clone();
        self.set_status("Requesting AI suggestions…", StatusTone::Busy);
        self.jobs
            .begin_suggest(self.assist.clone(), api_key, subject_id, subject_name, year);
    }

    pub(super) fn apply_suggestions_ready(&mut self, message: SuggestionsResult) {
        self.jobs.clear_suggest();
        self.ui.suggestions.requesting = false;
        if Some(&message.subject_id) != self.selected_subject.as_ref() {
            return;
        }
        match message.result {
            Ok(drafts) if drafts.is_empty() => {
                self.set_status("No suggestions returned", StatusTone::Warning);
            }
            Ok(drafts) => {
                self.ui.suggestions.rows = view_model::suggestion_rows(&drafts);
                self.ui.suggestions.open = true;
                self.set_status(
                    format!("{} suggestions ready", self.ui.suggestions.rows.len()),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "suggestion request failed");
                self.set_status(format!("Failed to fetch suggestions: {err}"), StatusTone::Error);
            }
        }
    }

    /// Flip one suggestion checkbox.
    pub fn toggle_suggestion(&mut self, index: usize) {
        if let Some(row) = self.ui.suggestions.rows.get_mut(index) {
            row.selected = !row.selected;
        }
    }

    /// Persist the checked suggestions in display order.
    pub fn commit_selected_suggestions(&mut self) {
        let Some(subject_id) = self.selected_subject.clone() else {
            return;
        };
        if self.jobs.commit_in_progress {
            return;
        }
        let drafts: Vec<DskpDraft> = self
            .ui
            .suggestions
            .rows
            .iter()
            .filter(|row| row.selected)
            .map(|row| DskpDraft {
                sk: row.sk.clone(),
                sp: row.sp.clone(),
            })
            .collect();
        if drafts.is_empty() {
            return;
        }
        self.ui.suggestions.committing = true;
        self.set_status(
            format!("Adding {} suggested item(s)…", drafts.len()),
            StatusTone::Busy,
        );
        self.jobs
            .begin_commit(self.school.clone(), subject_id, drafts);
    }

    /// Close the suggestions modal and discard its rows.
    pub fn cancel_suggestions(&mut self) {
        self.ui.suggestions.close();
    }

    pub(super) fn apply_commit_finished(&mut self, message: CommitResult) {
        self.jobs.clear_commit();
        self.ui.suggestions.close();
        self.apply_batch_outcome(&message.subject_id, message.outcome, "Added");
    }
}
