use crate::app::{Message, Model, ToastLevel};
use crate::composer::{ClipboardWriter, FileExporter, export_to_clipboard, export_to_file};

/// Side effects that run after [`crate::app::update`].
///
/// The update function stays pure; copying and saving happen here against
/// whichever clipboard and exporter the app was built with.
pub struct Effects {
    clipboard: Box<dyn ClipboardWriter>,
    exporter: Box<dyn FileExporter>,
}

impl Effects {
    pub fn new(clipboard: Box<dyn ClipboardWriter>, exporter: Box<dyn FileExporter>) -> Self {
        Self {
            clipboard,
            exporter,
        }
    }

    pub fn apply(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::CopyMarkdown => self.copy_markdown(model),
            Message::SaveMarkdown => self.save_markdown(model),
            _ => {}
        }
    }

    fn copy_markdown(&mut self, model: &mut Model) {
        match export_to_clipboard(&model.document, self.clipboard.as_mut()) {
            Ok(bytes) => model.show_toast(ToastLevel::Info, format!("Markdown copied ({bytes} bytes)")),
            Err(err) => {
                tracing::warn!("copy failed: {err}");
                model.show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
            }
        }
    }

    fn save_markdown(&mut self, model: &mut Model) {
        match export_to_file(&model.document, self.exporter.as_mut()) {
            Ok(path) => model.show_toast(ToastLevel::Info, format!("Saved {}", path.display())),
            Err(err) => {
                tracing::warn!("save failed: {err}");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}

impl std::fmt::Debug for Effects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effects").finish_non_exhaustive()
    }
}
