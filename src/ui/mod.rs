use iced::{
    widget::{button, column, text, Space},
    Element, Length,
};

const NO_FILE_LABEL: &str = "Drop your PDF here or click to browse";

/// What the form needs to draw itself
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadView<'a> {
    pub file_name: Option<&'a str>,
    pub is_uploading: bool,
    pub can_convert: bool,
}

#[derive(Debug, Clone)]
pub enum UploadMessage {
    BrowsePressed,
    ConvertPressed,
}

impl<'a> UploadView<'a> {
    pub fn file_label(&self) -> &'a str {
        self.file_name.unwrap_or(NO_FILE_LABEL)
    }

    pub fn convert_label(&self) -> &'static str {
        if self.is_uploading {
            "Processing..."
        } else {
            "Convert to Excel"
        }
    }

    /// `None` keeps the convert button disabled.
    pub fn convert_action(&self) -> Option<UploadMessage> {
        self.can_convert.then_some(UploadMessage::ConvertPressed)
    }

    pub fn view(self) -> Element<'a, UploadMessage> {
        column![
            text("PDF to Excel Extractor").size(32),
            text("Upload your PDF file to convert it to Excel").size(16),
            Space::new().height(Length::Fixed(20.0)),
            button(text(self.file_label()))
                .on_press(UploadMessage::BrowsePressed)
                .padding(20)
                .width(Length::Fill),
            Space::new().height(Length::Fixed(10.0)),
            button(text(self.convert_label()))
                .on_press_maybe(self.convert_action())
                .padding([10, 20])
                .width(Length::Fill),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_without_file() {
        let view = UploadView::default();
        assert_eq!(view.file_label(), NO_FILE_LABEL);
        assert_eq!(view.convert_label(), "Convert to Excel");
        assert!(view.convert_action().is_none());
    }

    #[test]
    fn test_convert_enabled_with_file() {
        let view = UploadView {
            file_name: Some("report.pdf"),
            is_uploading: false,
            can_convert: true,
        };
        assert_eq!(view.file_label(), "report.pdf");
        assert!(matches!(
            view.convert_action(),
            Some(UploadMessage::ConvertPressed)
        ));
    }

    #[test]
    fn test_convert_disabled_while_uploading() {
        let view = UploadView {
            file_name: Some("report.pdf"),
            is_uploading: true,
            can_convert: false,
        };
        assert_eq!(view.convert_label(), "Processing...");
        assert!(view.convert_action().is_none());
    }
}
