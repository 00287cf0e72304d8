use cosmic::iced::Length;
use cosmic::widget::{column, container, flex_row, scrollable, text};
use cosmic::Element;
use uuid::Uuid;

use crate::components::note_card::note_card;
use crate::core::note::Note;
use crate::fl;
use crate::message::Message;
use crate::store::notes::NoteStore;

fn card_grid(notes: &[&Note], pending_delete: Option<Uuid>) -> Element<'static, Message> {
    let cards: Vec<Element<'static, Message>> = notes
        .iter()
        .map(|note| note_card(note, pending_delete == Some(note.id)))
        .collect();
    flex_row(cards).row_spacing(12).column_spacing(12).into()
}

pub fn notes_view(store: &NoteStore, pending_delete: Option<Uuid>) -> Element<'static, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::caption(fl!("notes-count", count = (store.len() as i64))));

    if store.is_empty() {
        content = content.push(
            container(
                column()
                    .spacing(4)
                    .push(text::body(fl!("notes-empty")))
                    .push(text::caption(fl!("notes-empty-hint"))),
            )
            .padding(32)
            .center_x(Length::Fill)
            .width(Length::Fill),
        );
    } else {
        let pinned = store.pinned();
        let others = store.unpinned();

        if pinned.is_empty() {
            content = content.push(card_grid(&others, pending_delete));
        } else {
            content = content.push(text::title4(fl!("notes-pinned")));
            content = content.push(card_grid(&pinned, pending_delete));
            if !others.is_empty() {
                content = content.push(text::title4(fl!("notes-others")));
                content = content.push(card_grid(&others, pending_delete));
            }
        }
    }

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Read-only note detail, shown in the context drawer.
pub fn note_viewer(note: &Note) -> Element<'static, Message> {
    let mut col = column().spacing(8);

    col = col.push(text::title4(note.title.clone()));
    col = col.push(text::caption(format!(
        "{} · {}",
        note.color.label(),
        note.created_at.format("%Y-%m-%d %H:%M")
    )));

    if let Some(reminder) = note.reminder {
        col = col.push(text::caption(format!(
            "⏰ {}",
            reminder.format("%Y-%m-%d %H:%M")
        )));
    }

    if !note.labels.is_empty() {
        col = col.push(text::caption(note.labels.join(", ")));
    }

    col = col.push(text::body(note.content.clone()));

    col.into()
}
