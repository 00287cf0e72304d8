use uuid::Uuid;

use crate::api::AuthSession;
use crate::core::note::NoteColor;
use crate::core::user::{LoginRecord, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

/// Sidebar pages, only reachable once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Notes,
    Activity,
    Settings,
}

impl Page {
    pub const ALL: &'static [Page] = &[Page::Notes, Page::Activity, Page::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Notes => "Notes",
            Page::Activity => "Activity",
            Page::Settings => "Settings",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Page::Notes => "accessories-text-editor-symbolic",
            Page::Activity => "document-open-recent-symbolic",
            Page::Settings => "emblem-system-symbolic",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // Auth
    SetAuthMode(AuthMode),
    AuthFieldChanged(AuthField, String),
    SubmitAuth,
    AuthCompleted(Result<AuthSession, String>),
    SessionRestored(Result<User, String>),
    Logout,

    // Login activity
    RefreshLogs,
    LogsFetched(Result<Vec<LoginRecord>, String>),

    // Note form (context drawer)
    OpenNoteForm(Option<Uuid>),
    CloseNoteForm,
    NoteFormTitle(String),
    NoteFormContent(String),
    NoteFormLabels(String),
    NoteFormColor(NoteColor),
    NoteFormTogglePin(bool),
    NoteFormReminder(String),
    NoteFormSubmit,

    // Note actions
    ViewNote(Uuid),
    CloseNoteViewer,
    TogglePin(Uuid),
    CycleColor(Uuid),
    ConfirmDeleteNote(Uuid),
    CancelDeleteNote,
    DeleteNote(Uuid),

    // Settings
    SetApiBaseUrl(String),
    ToggleDebugLogging(bool),

    // Notices
    DismissNotice,
}
