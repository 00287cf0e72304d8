use cosmic::iced::{Alignment, Length};
use cosmic::widget::{column, container, row, scrollable, text, text_input};
use cosmic::Element;

use crate::config::QuillConfig;
use crate::fl;
use crate::message::Message;

pub fn settings_view(config: &QuillConfig) -> Element<'_, Message> {
    let mut content = column().spacing(12);

    // --- Server ---
    content = content.push(text::title4(fl!("settings-server")));
    content = content.push(
        text_input::text_input(fl!("settings-api-url"), &config.api_base_url)
            .on_input(Message::SetApiBaseUrl)
            .width(Length::Fill),
    );
    content = content.push(text::caption(fl!("settings-api-url-hint")));

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("settings-debug-logging")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(Message::ToggleDebugLogging),
            ),
    );

    // --- Storage ---
    content = content.push(text::title4(fl!("settings-storage")));
    content = content.push(text::caption(config.data_directory.display().to_string()));

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
