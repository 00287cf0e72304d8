use chrono::NaiveDateTime;

use cosmic::app::{Core, Task as CosmicTask, context_drawer};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, nav_bar, row, scrollable, text};
use cosmic::{Application, Element, executor, theme};

use crate::api::ApiClient;
use crate::config::QuillConfig;
use crate::core::note::{Note, NoteColor, parse_labels};
use crate::core::user::LoginRecord;
use crate::core::validate::{self, FieldErrors};
use crate::fl;
use crate::message::{AuthField, AuthMode, Message, Page};
use crate::pages;
use crate::store::notes::{LoadOutcome, NoteStore};
use crate::store::session::{Session, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDrawerState {
    NoteForm,
    NoteViewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub errors: FieldErrors,
    pub in_flight: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            errors: FieldErrors::new(),
            in_flight: false,
        }
    }
}

#[derive(Default)]
pub struct NoteForm {
    /// Set when editing an existing note.
    pub editing: Option<uuid::Uuid>,
    pub title: String,
    pub content: String,
    pub labels: String,
    pub color: NoteColor,
    pub is_pinned: bool,
    pub reminder: String,
    pub errors: FieldErrors,
}

impl NoteForm {
    fn from_note(note: &Note) -> Self {
        Self {
            editing: Some(note.id),
            title: note.title.clone(),
            content: note.content.clone(),
            labels: note.labels.join(", "),
            color: note.color,
            is_pinned: note.is_pinned,
            reminder: note
                .reminder
                .map(|r| r.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            errors: FieldErrors::new(),
        }
    }
}

pub struct Quill {
    core: Core,
    nav_model: nav_bar::Model,
    config: QuillConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    active_page: Page,

    api: ApiClient,
    session: Session,
    notes: NoteStore,
    logs: Vec<LoginRecord>,

    auth_form: AuthForm,
    note_form: NoteForm,
    viewing_note: Option<uuid::Uuid>,
    pending_delete_note: Option<uuid::Uuid>,
    context_drawer_state: Option<ContextDrawerState>,
    notice: Option<(NoticeKind, String)>,
}

pub struct Flags {
    pub config: QuillConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
}

impl Application for Quill {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = "dev.quill.app";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;
        let cosmic_config = flags.cosmic_config;

        if let Err(e) = config.ensure_files() {
            log::error!("Failed to create data directory: {}", e);
        }

        let mut nav_model = nav_bar::Model::default();
        for page in Page::ALL {
            nav_model
                .insert()
                .text(page.title())
                .icon(icon::from_name(page.icon_name()).icon())
                .data(*page);
        }
        nav_model.activate_position(0);

        let tokens = crate::api::token::TokenStore::new(config.token_path());
        let api = ApiClient::new(&config.api_base_url, tokens)
            .expect("Failed to build HTTP client");

        let mut notes = NoteStore::new(config.notes_path());
        let mut notice = None;
        if notes.load() == LoadOutcome::Recovered {
            notice = Some((
                NoticeKind::Error,
                "Your saved notes could not be read; starting fresh.".to_string(),
            ));
        }

        // A leftover token means a previous session may still be valid:
        // verify it against the profile endpoint before showing anything.
        let (session, task) = if api.tokens().load().is_some() {
            let client = api.clone();
            (
                Session::restoring(),
                CosmicTask::perform(
                    async move { client.profile().await.map_err(|e| e.to_string()) },
                    |result| cosmic::Action::App(Message::SessionRestored(result)),
                ),
            )
        } else {
            (Session::signed_out(), CosmicTask::none())
        };

        let app = Self {
            core,
            nav_model,
            config,
            cosmic_config,
            active_page: Page::Notes,
            api,
            session,
            notes,
            logs: Vec::new(),
            auth_form: AuthForm::default(),
            note_form: NoteForm::default(),
            viewing_note: None,
            pending_delete_note: None,
            context_drawer_state: None,
            notice,
        };

        (app, task)
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        match self.session.state() {
            SessionState::SignedIn => Some(&self.nav_model),
            _ => None,
        }
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        if let Some(page) = self.nav_model.data::<Page>(id).copied() {
            self.active_page = page;
            self.nav_model.activate(id);
            if page == Page::Activity && self.logs.is_empty() {
                return self.fetch_logs_task();
            }
        }
        CosmicTask::none()
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        if self.session.state() != SessionState::SignedIn {
            return Vec::new();
        }

        vec![
            row()
                .spacing(4)
                .push(
                    button::icon(icon::from_name("list-add-symbolic"))
                        .on_press(Message::OpenNoteForm(None)),
                )
                .push(
                    button::icon(icon::from_name("system-log-out-symbolic"))
                        .on_press(Message::Logout),
                )
                .into(),
        ]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::SetAuthMode(mode) => {
                self.auth_form.mode = mode;
                self.auth_form.errors.clear();
            }

            Message::AuthFieldChanged(field, value) => {
                match field {
                    AuthField::Name => self.auth_form.name = value,
                    AuthField::Email => self.auth_form.email = value,
                    AuthField::Password => self.auth_form.password = value,
                }
            }

            Message::SubmitAuth => {
                if self.auth_form.in_flight {
                    return CosmicTask::none();
                }

                let form = &mut self.auth_form;
                form.errors = match form.mode {
                    AuthMode::Login => validate::validate_login(&form.email, &form.password),
                    AuthMode::Signup => {
                        validate::validate_signup(&form.name, &form.email, &form.password)
                    }
                };
                if !form.errors.is_empty() {
                    return CosmicTask::none();
                }

                form.in_flight = true;
                let client = self.api.clone();
                let mode = form.mode;
                let name = form.name.trim().to_string();
                let email = form.email.trim().to_string();
                let password = form.password.clone();

                return CosmicTask::perform(
                    async move {
                        let result = match mode {
                            AuthMode::Login => client.login(&email, &password).await,
                            AuthMode::Signup => client.signup(&name, &email, &password).await,
                        };
                        result.map_err(|e| e.to_string())
                    },
                    |result| cosmic::Action::App(Message::AuthCompleted(result)),
                );
            }

            Message::AuthCompleted(result) => {
                self.auth_form.in_flight = false;
                match result {
                    Ok(auth) => {
                        let mode = self.auth_form.mode;
                        let user = self.session.establish(auth, self.api.tokens());
                        log::info!("Signed in as {}", user.email);
                        self.auth_form = AuthForm::default();
                        self.notice = Some((NoticeKind::Info, auth_notice(mode, &user.name)));
                        return self.fetch_logs_task();
                    }
                    Err(e) => {
                        self.notice = Some((NoticeKind::Error, e));
                    }
                }
            }

            Message::SessionRestored(result) => match result {
                Ok(user) => {
                    log::info!("Restored session for {}", user.email);
                    self.session.resume(user);
                    return self.fetch_logs_task();
                }
                Err(e) => {
                    log::info!("Session restore failed: {}", e);
                    self.session.restore_failed(self.api.tokens());
                }
            },

            Message::Logout => {
                let name = self.session.sign_out(self.api.tokens());
                self.logs.clear();
                self.active_page = Page::Notes;
                self.close_drawer();
                self.notice = Some((NoticeKind::Info, format!("Goodbye, {}! 👋", name)));
            }

            Message::RefreshLogs => {
                return self.fetch_logs_task();
            }

            Message::LogsFetched(result) => match result {
                Ok(logs) => {
                    log::debug!("Fetched {} login records", logs.len());
                    self.logs = logs;
                }
                Err(e) => {
                    log::error!("Failed to fetch login activity: {}", e);
                    self.notice = Some((NoticeKind::Error, e));
                }
            },

            Message::OpenNoteForm(editing) => {
                if self.session.state() != SessionState::SignedIn {
                    return CosmicTask::none();
                }
                self.note_form = match editing.and_then(|id| self.notes.get(id)) {
                    Some(note) => NoteForm::from_note(note),
                    None => NoteForm::default(),
                };
                self.context_drawer_state = Some(ContextDrawerState::NoteForm);
                self.core.window.show_context = true;
            }

            Message::CloseNoteForm | Message::CloseNoteViewer => {
                self.close_drawer();
            }

            Message::NoteFormTitle(value) => self.note_form.title = value,
            Message::NoteFormContent(value) => self.note_form.content = value,
            Message::NoteFormLabels(value) => self.note_form.labels = value,
            Message::NoteFormColor(color) => self.note_form.color = color,
            Message::NoteFormTogglePin(pinned) => self.note_form.is_pinned = pinned,
            Message::NoteFormReminder(value) => self.note_form.reminder = value,

            Message::NoteFormSubmit => {
                let form = &mut self.note_form;
                form.errors = validate::validate_note(&form.title, &form.content);

                let reminder = match parse_reminder(&form.reminder) {
                    Ok(r) => r,
                    Err(e) => {
                        form.errors.insert("reminder", e);
                        None
                    }
                };
                if !form.errors.is_empty() {
                    return CosmicTask::none();
                }

                let mut note = Note::new(form.title.trim(), form.content.trim());
                note.labels = parse_labels(&form.labels);
                note.color = form.color;
                note.is_pinned = form.is_pinned;
                note.reminder = reminder;

                let result = match form.editing {
                    Some(id) => {
                        note.id = id;
                        self.notes.edit(note)
                    }
                    None => self.notes.add(note),
                };

                match result {
                    Ok(()) => {
                        let text = if self.note_form.editing.is_some() {
                            "Note updated! ✏️"
                        } else {
                            "Note added! 📝"
                        };
                        self.notice = Some((NoticeKind::Info, text.to_string()));
                        self.close_drawer();
                    }
                    Err(e) => {
                        self.notice = Some((NoticeKind::Error, e));
                    }
                }
            }

            Message::ViewNote(id) => {
                if self.notes.get(id).is_some() {
                    self.viewing_note = Some(id);
                    self.context_drawer_state = Some(ContextDrawerState::NoteViewer);
                    self.core.window.show_context = true;
                }
            }

            Message::TogglePin(id) => {
                if let Err(e) = self.notes.toggle_pin(id) {
                    self.notice = Some((NoticeKind::Error, e));
                }
            }

            Message::CycleColor(id) => {
                if let Err(e) = self.notes.cycle_color(id) {
                    self.notice = Some((NoticeKind::Error, e));
                }
            }

            Message::ConfirmDeleteNote(id) => {
                self.pending_delete_note = Some(id);
            }

            Message::CancelDeleteNote => {
                self.pending_delete_note = None;
            }

            Message::DeleteNote(id) => {
                self.pending_delete_note = None;
                if self.viewing_note == Some(id) {
                    self.close_drawer();
                }
                match self.notes.delete(id) {
                    Ok(()) => {
                        self.notice =
                            Some((NoticeKind::Info, "Note deleted! 🗑️".to_string()));
                    }
                    Err(e) => {
                        self.notice = Some((NoticeKind::Error, e));
                    }
                }
            }

            Message::SetApiBaseUrl(url) => {
                self.config.api_base_url = url;
                self.api.set_base_url(&self.config.api_base_url);
                self.save_config();
            }

            Message::ToggleDebugLogging(enabled) => {
                self.config.debug_logging = enabled;
                quill::set_debug_logging(enabled);
                self.save_config();
            }

            Message::DismissNotice => {
                self.notice = None;
            }
        }
        CosmicTask::none()
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        let drawer_state = self.context_drawer_state?;

        match drawer_state {
            ContextDrawerState::NoteForm => {
                let title = if self.note_form.editing.is_some() {
                    fl!("note-form-edit")
                } else {
                    fl!("note-form-new")
                };
                Some(
                    context_drawer::context_drawer(
                        container(scrollable(self.note_form_view().padding(16)))
                            .width(Length::Fill),
                        Message::CloseNoteForm,
                    )
                    .title(title),
                )
            }
            ContextDrawerState::NoteViewer => {
                let note = self.viewing_note.and_then(|id| self.notes.get(id))?;
                Some(
                    context_drawer::context_drawer(
                        container(scrollable(
                            column().push(pages::notes::note_viewer(note)).padding(16),
                        ))
                        .width(Length::Fill),
                        Message::CloseNoteViewer,
                    )
                    .title(fl!("note-viewer-title")),
                )
            }
        }
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.context_drawer_state.is_some() {
            self.close_drawer();
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::event::listen_with(|event, _status, _id| match event {
            cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                key: cosmic::iced::keyboard::Key::Character(ref c),
                modifiers,
                ..
            }) if c.as_str() == "n" && modifiers.control() => {
                Some(Message::OpenNoteForm(None))
            }
            _ => None,
        })
    }

    fn view(&self) -> Element<'_, Message> {
        let body = match self.session.state() {
            SessionState::Restoring => pages::login::loading_view(),
            SessionState::SignedOut => pages::login::auth_view(&self.auth_form),
            SessionState::SignedIn => match self.active_page {
                Page::Notes => pages::notes::notes_view(&self.notes, self.pending_delete_note),
                Page::Activity => {
                    pages::activity::activity_view(self.session.user(), &self.logs)
                }
                Page::Settings => pages::settings::settings_view(&self.config),
            },
        };

        let mut content = column();
        if let Some(bar) = self.notice_bar() {
            content = content.push(bar);
        }
        content.push(body).into()
    }
}

impl Quill {
    fn note_form_view(&self) -> cosmic::widget::column::Column<'_, Message> {
        use cosmic::widget::text_input;

        let form = &self.note_form;
        let mut content = column().spacing(16);

        content = content.push(text::title4("Title"));
        content = content.push(
            text_input::text_input("Note title...", &form.title)
                .on_input(Message::NoteFormTitle)
                .width(Length::Fill),
        );
        if let Some(e) = form.errors.get("title") {
            content = content.push(text::caption(format!("✗ {}", e)).size(11.0));
        }

        content = content.push(text::title4("Content"));
        content = content.push(
            text_input::text_input("Write your note...", &form.content)
                .on_input(Message::NoteFormContent)
                .width(Length::Fill),
        );
        if let Some(e) = form.errors.get("content") {
            content = content.push(text::caption(format!("✗ {}", e)).size(11.0));
        }

        content = content.push(text::title4("Labels"));
        content = content.push(
            text_input::text_input("Labels (comma-separated)", &form.labels)
                .on_input(Message::NoteFormLabels)
                .width(Length::Fill),
        );

        content = content.push(text::title4("Color"));
        let color_items: Vec<Element<'_, Message>> = NoteColor::ALL
            .iter()
            .map(|color| {
                let btn: Element<'_, Message> = if *color == form.color {
                    button::suggested(color.label())
                        .on_press(Message::NoteFormColor(*color))
                        .into()
                } else {
                    button::standard(color.label())
                        .on_press(Message::NoteFormColor(*color))
                        .into()
                };
                btn
            })
            .collect();
        content = content.push(
            cosmic::widget::flex_row(color_items)
                .row_spacing(4)
                .column_spacing(4),
        );

        content = content.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(text::body("Pinned").width(Length::Fill))
                .push(
                    cosmic::widget::toggler(form.is_pinned)
                        .on_toggle(Message::NoteFormTogglePin),
                ),
        );

        content = content.push(text::title4("Reminder"));
        content = content.push(
            text_input::text_input("YYYY-MM-DD HH:MM", &form.reminder)
                .on_input(Message::NoteFormReminder)
                .width(Length::Fill),
        );
        if let Some(e) = form.errors.get("reminder") {
            content = content.push(text::caption(format!("✗ {}", e)).size(11.0));
        }

        let submit_label = if form.editing.is_some() {
            "Save Changes"
        } else {
            "Create Note"
        };
        content = content.push(
            button::suggested(submit_label)
                .on_press(Message::NoteFormSubmit)
                .width(Length::Fill),
        );

        content
    }

    fn notice_bar(&self) -> Option<Element<'_, Message>> {
        let (kind, message) = self.notice.as_ref()?;
        let body = match kind {
            NoticeKind::Info => text::body(message.clone()),
            NoticeKind::Error => text::body(format!("✗ {}", message)),
        };
        Some(
            container(
                row()
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .push(body.width(Length::Fill))
                    .push(
                        button::icon(icon::from_name("window-close-symbolic"))
                            .on_press(Message::DismissNotice),
                    ),
            )
            .padding([8, 16])
            .width(Length::Fill)
            .class(theme::Container::Card)
            .into(),
        )
    }

    fn fetch_logs_task(&self) -> CosmicTask<Message> {
        let client = self.api.clone();
        CosmicTask::perform(
            async move { client.login_logs().await.map_err(|e| e.to_string()) },
            |result| cosmic::Action::App(Message::LogsFetched(result)),
        )
    }

    fn close_drawer(&mut self) {
        self.context_drawer_state = None;
        self.viewing_note = None;
        self.core.window.show_context = false;
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}

/// Success notice after login or signup; the two flows greet differently.
fn auth_notice(mode: AuthMode, name: &str) -> String {
    match mode {
        AuthMode::Login => format!("Welcome back, {}! 👋", name),
        AuthMode::Signup => format!("Welcome, {}! Your account is ready. 🎉", name),
    }
}

/// Empty input means no reminder; anything else must be `YYYY-MM-DD HH:MM`.
fn parse_reminder(input: &str) -> Result<Option<NaiveDateTime>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .map(Some)
        .map_err(|_| "Use the format YYYY-MM-DD HH:MM".to_string())
}
