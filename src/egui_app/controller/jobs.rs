use crate::assist::AssistApi;
use crate::school::{ApiError, ClassId, DskpDraft, DskpItem, SchoolApi, SchoolClass, Subject, SubjectId};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

pub(crate) enum JobMessage {
    ClassesLoaded(ClassesLoadResult),
    SubjectsLoaded(SubjectsLoadResult),
    SubjectCreated(SubjectCreateResult),
    ItemsLoaded(ItemsLoadResult),
    ImportFinished(ImportResult),
    SuggestionsReady(SuggestionsResult),
    CommitFinished(CommitResult),
}

#[derive(Debug)]
pub(crate) struct ClassesLoadResult {
    pub(crate) result: Result<Vec<SchoolClass>, ApiError>,
}

#[derive(Debug)]
pub(crate) struct SubjectsLoadResult {
    pub(crate) class_id: ClassId,
    pub(crate) result: Result<Vec<Subject>, ApiError>,
}

#[derive(Debug)]
pub(crate) struct SubjectCreateResult {
    pub(crate) class_id: ClassId,
    pub(crate) name: String,
    pub(crate) result: Result<SubjectId, ApiError>,
}

#[derive(Debug)]
pub(crate) struct ItemsLoadResult {
    pub(crate) subject_id: SubjectId,
    pub(crate) result: Result<Vec<DskpItem>, ApiError>,
}

#[derive(Debug)]
pub(crate) struct ImportResult {
    pub(crate) subject_id: SubjectId,
    /// `Err` means nothing was extracted and no create was attempted.
    pub(crate) result: Result<BatchOutcome, String>,
}

#[derive(Debug)]
pub(crate) struct SuggestionsResult {
    pub(crate) subject_id: SubjectId,
    pub(crate) result: Result<Vec<DskpDraft>, String>,
}

#[derive(Debug)]
pub(crate) struct CommitResult {
    pub(crate) subject_id: SubjectId,
    pub(crate) outcome: BatchOutcome,
}

/// Result of persisting drafts one by one and reloading the list once.
#[derive(Debug)]
pub(crate) struct BatchOutcome {
    /// How many drafts were created before stopping.
    pub(crate) persisted: usize,
    /// First create failure; drafts after it were not attempted.
    pub(crate) create_error: Option<String>,
    /// The single post-batch reload, attempted even after a create failure.
    pub(crate) refreshed: Result<Vec<DskpItem>, ApiError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pub(super) classes_load_in_progress: bool,
    pub(super) pending_subjects: Option<ClassId>,
    pub(super) pending_items: Option<SubjectId>,
    pub(super) subject_create_in_progress: bool,
    pub(super) import_in_progress: bool,
    pub(super) suggest_in_progress: bool,
    pub(super) commit_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            classes_load_in_progress: false,
            pending_subjects: None,
            pending_items: None,
            subject_create_in_progress: false,
            import_in_progress: false,
            suggest_in_progress: false,
            commit_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn any_in_flight(&self) -> bool {
        self.classes_load_in_progress
            || self.pending_subjects.is_some()
            || self.pending_items.is_some()
            || self.subject_create_in_progress
            || self.import_in_progress
            || self.suggest_in_progress
            || self.commit_in_progress
    }

    pub(super) fn begin_classes_load(&mut self, api: SchoolApi) {
        if self.classes_load_in_progress {
            return;
        }
        self.classes_load_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.list_classes();
            let _ = tx.send(JobMessage::ClassesLoaded(ClassesLoadResult { result }));
        });
    }

    pub(super) fn clear_classes_load(&mut self) {
        self.classes_load_in_progress = false;
    }

    /// Fetch subjects for a class. A newer request supersedes an older
    /// in-flight one; stale results are dropped on receipt.
    pub(super) fn begin_subjects_load(&mut self, api: SchoolApi, class_id: ClassId) {
        self.pending_subjects = Some(class_id.clone());
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.list_subjects(&class_id);
            let _ = tx.send(JobMessage::SubjectsLoaded(SubjectsLoadResult {
                class_id,
                result,
            }));
        });
    }

    pub(super) fn subjects_load_matches(&self, class_id: &ClassId) -> bool {
        self.pending_subjects.as_ref() == Some(class_id)
    }

    pub(super) fn clear_subjects_load(&mut self) {
        self.pending_subjects = None;
    }

    pub(super) fn begin_subject_create(&mut self, api: SchoolApi, class_id: ClassId, name: String) {
        if self.subject_create_in_progress {
            return;
        }
        self.subject_create_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.create_subject(&class_id, &name);
            let _ = tx.send(JobMessage::SubjectCreated(SubjectCreateResult {
                class_id,
                name,
                result,
            }));
        });
    }

    pub(super) fn clear_subject_create(&mut self) {
        self.subject_create_in_progress = false;
    }

    /// Fetch items for a subject, superseding any in-flight fetch.
    pub(super) fn begin_items_load(&mut self, api: SchoolApi, subject_id: SubjectId) {
        self.pending_items = Some(subject_id.clone());
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.list_items(&subject_id);
            let _ = tx.send(JobMessage::ItemsLoaded(ItemsLoadResult { subject_id, result }));
        });
    }

    pub(super) fn items_load_matches(&self, subject_id: &SubjectId) -> bool {
        self.pending_items.as_ref() == Some(subject_id)
    }

    pub(super) fn clear_items_load(&mut self) {
        self.pending_items = None;
    }

    pub(super) fn begin_import(
        &mut self,
        school: SchoolApi,
        assist: AssistApi,
        api_key: String,
        subject_id: SubjectId,
        path: PathBuf,
    ) {
        if self.import_in_progress {
            return;
        }
        self.import_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = super::items::run_import(&school, &assist, &api_key, &subject_id, &path);
            let _ = tx.send(JobMessage::ImportFinished(ImportResult { subject_id, result }));
        });
    }

    pub(super) fn clear_import(&mut self) {
        self.import_in_progress = false;
    }

    pub(super) fn begin_suggest(
        &mut self,
        assist: AssistApi,
        api_key: String,
        subject_id: SubjectId,
        subject_name: String,
        year_level: String,
    ) {
        if self.suggest_in_progress {
            return;
        }
        self.suggest_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = assist
                .suggest_dskp_items(&api_key, &subject_name, &year_level)
                .map_err(|err| err.to_string());
            let _ = tx.send(JobMessage::SuggestionsReady(SuggestionsResult {
                subject_id,
                result,
            }));
        });
    }

    pub(super) fn clear_suggest(&mut self) {
        self.suggest_in_progress = false;
    }

    pub(super) fn begin_commit(
        &mut self,
        school: SchoolApi,
        subject_id: SubjectId,
        drafts: Vec<DskpDraft>,
    ) {
        if self.commit_in_progress {
            return;
        }
        self.commit_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let outcome = super::items::run_batch_persist(&school, &subject_id, &drafts);
            let _ = tx.send(JobMessage::CommitFinished(CommitResult { subject_id, outcome }));
        });
    }

    pub(super) fn clear_commit(&mut self) {
        self.commit_in_progress = false;
    }
}
