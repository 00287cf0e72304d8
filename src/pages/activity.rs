use cosmic::iced::Length;
use cosmic::widget::{button, column, container, scrollable, text};
use cosmic::{Element, theme};

use crate::core::user::{LoginRecord, User};
use crate::fl;
use crate::message::Message;

const SHOWN_LOGINS: usize = 5;

/// The first few records in server order; the server sends newest first,
/// so these are the most recent logins.
fn recent_logins(logs: &[LoginRecord]) -> &[LoginRecord] {
    &logs[..logs.len().min(SHOWN_LOGINS)]
}

pub fn activity_view<'a>(user: Option<&'a User>, logs: &'a [LoginRecord]) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    if let Some(user) = user {
        content = content.push(
            container(
                column()
                    .spacing(4)
                    .push(text::title4(user.name.clone()))
                    .push(text::caption(user.email.clone())),
            )
            .padding(12)
            .width(Length::Fill)
            .class(theme::Container::Card),
        );
    }

    content = content.push(text::title4(fl!("activity-title")));

    if logs.is_empty() {
        content = content.push(
            container(text::body(fl!("activity-empty")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );
    } else {
        let total = logs.len();
        let mut list = column().spacing(6);
        for (i, record) in recent_logins(logs).iter().enumerate() {
            list = list.push(
                container(
                    column()
                        .spacing(2)
                        .push(text::body(format!("Login #{}", total - i)))
                        .push(text::caption(record.display_time())),
                )
                .padding(8)
                .width(Length::Fill)
                .class(theme::Container::Card),
            );
        }
        content = content.push(list);
    }

    content = content.push(button::standard("Refresh").on_press(Message::RefreshLogs));

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str) -> LoginRecord {
        LoginRecord {
            login_at: ts.to_string(),
        }
    }

    #[test]
    fn shows_the_first_five_records_in_server_order() {
        // Newest first, as the server sends them.
        let logs: Vec<LoginRecord> = (0..7)
            .map(|i| record(&format!("2026-08-{:02}T08:00:00Z", 30 - i)))
            .collect();

        let shown = recent_logins(&logs);
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0], logs[0]);
        assert_eq!(shown[4], logs[4]);

        // The newest record carries the highest login number.
        let total = logs.len();
        let labels: Vec<String> = shown
            .iter()
            .enumerate()
            .map(|(i, _)| format!("Login #{}", total - i))
            .collect();
        assert_eq!(labels.first().unwrap(), "Login #7");
        assert_eq!(labels.last().unwrap(), "Login #3");
    }

    #[test]
    fn short_lists_are_shown_whole() {
        let logs = vec![record("2026-08-30T08:00:00Z")];
        assert_eq!(recent_logins(&logs), &logs[..]);
        assert!(recent_logins(&[]).is_empty());
    }
}
