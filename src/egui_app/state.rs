//! Shared state types for the egui UI.

use crate::egui_app::ui::style;
use crate::school::{ClassId, ItemId, SubjectId};
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub classes: ClassPickerState,
    pub subjects: SubjectsPanelState,
    pub items: ItemsPanelState,
    pub suggestions: SuggestionsState,
    pub api_key: ApiKeyModalState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            classes: ClassPickerState::default(),
            subjects: SubjectsPanelState::default(),
            items: ItemsPanelState::default(),
            suggestions: SuggestionsState::default(),
            api_key: ApiKeyModalState::default(),
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Select a class to begin".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
        }
    }
}

/// Class dropdown in the top chrome.
#[derive(Clone, Debug, Default)]
pub struct ClassPickerState {
    pub rows: Vec<ClassRowView>,
    pub selected: Option<ClassId>,
    pub loading: bool,
}

impl ClassPickerState {
    /// Label for the currently selected class, if it is still listed.
    pub fn selected_label(&self) -> Option<&str> {
        let selected = self.selected.as_ref()?;
        self.rows
            .iter()
            .find(|row| &row.id == selected)
            .map(|row| row.label.as_str())
    }
}

/// Display data for a class dropdown entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRowView {
    pub id: ClassId,
    pub label: String,
}

/// Sidebar list of subjects for the selected class.
#[derive(Clone, Debug, Default)]
pub struct SubjectsPanelState {
    pub rows: Vec<SubjectRowView>,
    pub name_input: String,
    pub loading: bool,
    /// True while a create request is in flight.
    pub adding: bool,
}

/// Display data for a single subject row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectRowView {
    pub id: SubjectId,
    pub name: String,
    pub selected: bool,
}

/// Central list of curriculum items for the selected subject.
#[derive(Clone, Debug, Default)]
pub struct ItemsPanelState {
    /// Header label for the selected subject; `None` renders the
    /// pick-a-subject placeholder instead of the list.
    pub subject_label: Option<String>,
    pub rows: Vec<ItemRowView>,
    pub loading: bool,
    pub importing: bool,
}

/// Display data for a single curriculum item row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRowView {
    pub id: ItemId,
    pub sk: String,
    pub sp: String,
}

/// Modal state for AI-suggested curriculum items.
#[derive(Clone, Debug, Default)]
pub struct SuggestionsState {
    pub open: bool,
    pub requesting: bool,
    pub committing: bool,
    pub rows: Vec<SuggestionRowView>,
    pub subject_label: String,
    pub year_label: String,
}

impl SuggestionsState {
    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.selected).count()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.requesting = false;
        self.committing = false;
        self.rows.clear();
    }
}

/// One suggested item with its accept checkbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionRowView {
    pub sk: String,
    pub sp: String,
    pub selected: bool,
}

/// Modal state for entering or replacing the AI API key.
#[derive(Clone, Debug, Default)]
pub struct ApiKeyModalState {
    pub open: bool,
    pub input: String,
    /// Whether a key is already stored, shown as a hint in the modal.
    pub has_key: bool,
    pub last_error: Option<String>,
    pub focus_requested: bool,
}

impl ApiKeyModalState {
    pub fn open_for_entry(&mut self, has_key: bool) {
        self.open = true;
        self.input.clear();
        self.has_key = has_key;
        self.last_error = None;
        self.focus_requested = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.input.clear();
        self.last_error = None;
        self.focus_requested = false;
    }
}
