use std::sync::mpsc::TryRecvError;

use super::EguiController;
use super::jobs::JobMessage;

impl EguiController {
    /// Drain finished worker results. Called once per frame before rendering.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            match message {
                JobMessage::ClassesLoaded(message) => self.apply_classes_loaded(message),
                JobMessage::SubjectsLoaded(message) => self.apply_subjects_loaded(message),
                JobMessage::SubjectCreated(message) => self.apply_subject_created(message),
                JobMessage::ItemsLoaded(message) => self.apply_items_loaded(message),
                JobMessage::ImportFinished(message) => self.apply_import_finished(message),
                JobMessage::SuggestionsReady(message) => self.apply_suggestions_ready(message),
                JobMessage::CommitFinished(message) => self.apply_commit_finished(message),
            }
        }
    }
}
