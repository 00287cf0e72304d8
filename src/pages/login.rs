use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text, text_input};
use cosmic::{Element, theme};

use crate::application::AuthForm;
use crate::core::validate::FieldErrors;
use crate::fl;
use crate::message::{AuthField, AuthMode, Message};

const FORM_WIDTH: f32 = 360.0;

fn field_error(errors: &FieldErrors, field: &str) -> Option<Element<'static, Message>> {
    errors
        .get(field)
        .map(|e| text::caption(format!("✗ {}", e)).size(11.0).into())
}

fn mode_button(label: &'static str, mode: AuthMode, active: AuthMode) -> Element<'static, Message> {
    if mode == active {
        button::suggested(label).on_press(Message::SetAuthMode(mode)).into()
    } else {
        button::standard(label).on_press(Message::SetAuthMode(mode)).into()
    }
}

pub fn auth_view(form: &AuthForm) -> Element<'_, Message> {
    let mut content = column().spacing(12);

    let title = match form.mode {
        AuthMode::Login => fl!("auth-login-title"),
        AuthMode::Signup => fl!("auth-signup-title"),
    };
    content = content.push(text::title4(title));

    content = content.push(
        row()
            .spacing(4)
            .push(mode_button("Login", AuthMode::Login, form.mode))
            .push(mode_button("Sign Up", AuthMode::Signup, form.mode)),
    );

    if form.mode == AuthMode::Signup {
        content = content.push(
            text_input::text_input("Name", &form.name)
                .on_input(|v| Message::AuthFieldChanged(AuthField::Name, v))
                .width(Length::Fill),
        );
        if let Some(err) = field_error(&form.errors, "name") {
            content = content.push(err);
        }
    }

    content = content.push(
        text_input::text_input("Email", &form.email)
            .on_input(|v| Message::AuthFieldChanged(AuthField::Email, v))
            .width(Length::Fill),
    );
    if let Some(err) = field_error(&form.errors, "email") {
        content = content.push(err);
    }

    content = content.push(
        text_input::secure_input("Password", form.password.clone(), None::<Message>, true)
            .on_input(|v| Message::AuthFieldChanged(AuthField::Password, v))
            .on_submit(|_| Message::SubmitAuth)
            .width(Length::Fill),
    );
    if let Some(err) = field_error(&form.errors, "password") {
        content = content.push(err);
    }

    let submit_label = match (form.mode, form.in_flight) {
        (AuthMode::Login, false) => "Login",
        (AuthMode::Login, true) => "Logging in...",
        (AuthMode::Signup, false) => "Create Account",
        (AuthMode::Signup, true) => "Creating account...",
    };
    let mut submit = button::suggested(submit_label).width(Length::Fill);
    if !form.in_flight {
        submit = submit.on_press(Message::SubmitAuth);
    }
    content = content.push(submit);

    let card = container(content)
        .padding(24)
        .width(Length::Fixed(FORM_WIDTH))
        .class(theme::Container::Card);

    container(card)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Shown while a persisted session is being restored at startup.
pub fn loading_view() -> Element<'static, Message> {
    container(
        column()
            .spacing(8)
            .align_x(Alignment::Center)
            .push(text::title4(fl!("app-title")))
            .push(text::body(fl!("session-loading"))),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
