use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, icon, row, text};
use cosmic::{Element, theme};

use crate::core::note::Note;
use crate::message::Message;

const CARD_WIDTH: f32 = 280.0;

/// One dashboard card. The whole card opens the read-only viewer; the
/// action icons along the bottom mutate the note in place.
pub fn note_card(note: &Note, confirming_delete: bool) -> Element<'static, Message> {
    let note_id = note.id;
    let mut col = column().spacing(6);

    let mut title_row = row().spacing(4).align_y(Alignment::Center);
    if note.is_pinned {
        title_row = title_row.push(icon::from_name("view-pin-symbolic").size(14).icon());
    }
    title_row = title_row.push(text::body(note.title.clone()));
    col = col.push(title_row);

    if !note.content.is_empty() {
        let preview: String = note.content.lines().take(4).collect::<Vec<_>>().join("\n");
        col = col.push(text::caption(preview).size(12.0));
    }

    let mut badges: Vec<Element<'static, Message>> = vec![
        container(text::caption(note.color.label()).size(11.0))
            .padding([2, 6])
            .class(theme::Container::Card)
            .into(),
    ];
    for label in &note.labels {
        badges.push(
            container(text::caption(label.clone()).size(11.0))
                .padding([2, 6])
                .class(theme::Container::Card)
                .into(),
        );
    }
    col = col.push(flex_row(badges).row_spacing(4).column_spacing(4));

    col = col.push(text::caption(note.created_at.format("%Y-%m-%d").to_string()).size(11.0));

    if let Some(reminder) = note.reminder {
        col = col.push(
            text::caption(format!("⏰ {}", reminder.format("%Y-%m-%d %H:%M"))).size(11.0),
        );
    }

    let mut actions = row()
        .spacing(4)
        .push(
            button::icon(icon::from_name("view-pin-symbolic")).on_press(Message::TogglePin(note_id)),
        )
        .push(
            button::icon(icon::from_name("applications-graphics-symbolic"))
                .on_press(Message::CycleColor(note_id)),
        )
        .push(
            button::icon(icon::from_name("document-edit-symbolic"))
                .on_press(Message::OpenNoteForm(Some(note_id))),
        );

    if confirming_delete {
        actions = actions
            .push(button::destructive("Delete").on_press(Message::DeleteNote(note_id)))
            .push(button::standard("Cancel").on_press(Message::CancelDeleteNote));
    } else {
        actions = actions.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::ConfirmDeleteNote(note_id)),
        );
    }
    col = col.push(actions);

    let card_body = container(col)
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .class(theme::Container::Card);

    button::custom(card_body)
        .padding(0)
        .class(theme::Button::Text)
        .on_press(Message::ViewNote(note_id))
        .into()
}
