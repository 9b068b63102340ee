use super::EguiController;
use super::jobs::{BatchOutcome, ImportResult, ItemsLoadResult};
use crate::assist::AssistApi;
use crate::egui_app::ui::style::StatusTone;
use crate::school::{ApiError, DskpDraft, DskpItem, SchoolApi, SubjectId};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::{Path, PathBuf};

const IMPORT_MIME_TYPE: &str = "application/pdf";

impl EguiController {
    pub(super) fn apply_items_loaded(&mut self, message: ItemsLoadResult) {
        if !self.jobs.items_load_matches(&message.subject_id) {
            return;
        }
        self.jobs.clear_items_load();
        self.ui.items.loading = false;
        match message.result {
            Ok(items) => {
                self.items = items;
                self.refresh_items_ui();
                self.set_status(
                    format!("Loaded {} DSKP items", self.items.len()),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "item list load failed");
                self.set_status(format!("Failed to load DSKP items: {err}"), StatusTone::Error);
            }
        }
    }

    /// Pick a DSKP PDF via file picker and extract its items.
    pub fn begin_import_document(&mut self) {
        if self.selected_subject.is_none() || self.jobs.import_in_progress {
            return;
        }
        if self.require_api_key().is_none() {
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF documents", &["pdf"])
            .pick_file()
        else {
            return;
        };
        self.import_document_from_path(path);
    }

    /// Extract items from a known document path into the selected subject.
    pub fn import_document_from_path(&mut self, path: PathBuf) {
        let Some(subject_id) = self.selected_subject.clone() else {
            return;
        };
        if self.jobs.import_in_progress {
            return;
        }
        let Some(api_key) = self.require_api_key() else {
            return;
        };
        self.ui.items.importing = true;
        self.set_status("Parsing DSKP document…", StatusTone::Busy);
        self.jobs.begin_import(
            self.school.clone(),
            self.assist.clone(),
            api_key,
            subject_id,
            path,
        );
    }

    pub(super) fn apply_import_finished(&mut self, message: ImportResult) {
        self.jobs.clear_import();
        self.ui.items.importing = false;
        match message.result {
            Ok(outcome) => {
                if outcome.persisted == 0 && outcome.create_error.is_none() {
                    let _ = self.apply_reloaded_items(&message.subject_id, outcome.refreshed);
                    self.set_status(
                        "No SK/SP entries found in the document",
                        StatusTone::Warning,
                    );
                } else {
                    self.apply_batch_outcome(&message.subject_id, outcome, "Imported");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "DSKP import failed");
                self.set_status(format!("DSKP import failed: {err}"), StatusTone::Error);
            }
        }
    }

    /// Fold a persist batch back into the UI. The single reload already
    /// happened in the worker; here we swap the list in and report how far
    /// the batch got.
    pub(super) fn apply_batch_outcome(
        &mut self,
        subject_id: &SubjectId,
        outcome: BatchOutcome,
        verb: &str,
    ) {
        let reload_error = self.apply_reloaded_items(subject_id, outcome.refreshed);
        if let Some(err) = outcome.create_error {
            self.set_status(
                format!(
                    "{verb} {} item(s) before an error: {err}",
                    outcome.persisted
                ),
                StatusTone::Error,
            );
        } else if let Some(err) = reload_error {
            self.set_status(
                format!("{verb} {} item(s); reload failed: {err}", outcome.persisted),
                StatusTone::Warning,
            );
        } else {
            self.set_status(
                format!("{verb} {} item(s)", outcome.persisted),
                StatusTone::Success,
            );
        }
    }

    /// Install a reloaded item list if the subject is still on screen.
    fn apply_reloaded_items(
        &mut self,
        subject_id: &SubjectId,
        refreshed: Result<Vec<DskpItem>, ApiError>,
    ) -> Option<ApiError> {
        match refreshed {
            Ok(items) => {
                if Some(subject_id) == self.selected_subject.as_ref() {
                    self.items = items;
                    self.refresh_items_ui();
                }
                None
            }
            Err(err) => Some(err),
        }
    }
}

/// Worker body for the import flow: read, extract, persist, reload.
pub(super) fn run_import(
    school: &SchoolApi,
    assist: &AssistApi,
    api_key: &str,
    subject_id: &SubjectId,
    path: &Path,
) -> Result<BatchOutcome, String> {
    let bytes =
        std::fs::read(path).map_err(|err| format!("could not read {}: {err}", path.display()))?;
    let encoded = BASE64.encode(&bytes);
    let drafts = assist
        .extract_dskp_items(api_key, &encoded, IMPORT_MIME_TYPE)
        .map_err(|err| err.to_string())?;
    Ok(run_batch_persist(school, subject_id, &drafts))
}

/// Persist drafts one by one in order, stopping at the first failure, then
/// reload the item list exactly once.
pub(super) fn run_batch_persist(
    api: &SchoolApi,
    subject_id: &SubjectId,
    drafts: &[DskpDraft],
) -> BatchOutcome {
    let mut persisted = 0;
    let mut create_error = None;
    for draft in drafts {
        match api.create_item(subject_id, draft) {
            Ok(_) => persisted += 1,
            Err(err) => {
                create_error = Some(err.to_string());
                break;
            }
        }
    }
    let refreshed = api.list_items(subject_id);
    BatchOutcome {
        persisted,
        create_error,
        refreshed,
    }
}
