use std::rc::Rc;

use yew::Callback;

use crate::platform::{Clipboard, Console, Document, Scheduler};

/// Copies an element's rendered text to the system clipboard.
pub struct ClipboardCopier {
    document: Rc<dyn Document>,
    clipboard: Rc<dyn Clipboard>,
    console: Rc<dyn Console>,
    scheduler: Rc<dyn Scheduler>,
    on_copied: Callback<()>,
}

impl ClipboardCopier {
    pub fn new(
        document: Rc<dyn Document>,
        clipboard: Rc<dyn Clipboard>,
        console: Rc<dyn Console>,
        scheduler: Rc<dyn Scheduler>,
        on_copied: Callback<()>,
    ) -> Self {
        Self {
            document,
            clipboard,
            console,
            scheduler,
            on_copied,
        }
    }

    /// Fire-and-forget: the write completes on the local executor. Success
    /// emits `on_copied`; a rejected write is logged and dropped.
    pub fn copy(&self, element_id: &str) {
        let Some(el) = self.document.element_by_id(element_id) else {
            self.console
                .warn(&format!("Element #{element_id} not found."));
            return;
        };
        let text = el.text().trim().to_owned();
        let pending = self.clipboard.write_text(&text);
        let console = self.console.clone();
        let on_copied = self.on_copied.clone();
        self.scheduler.spawn(Box::pin(async move {
            match pending.await {
                Ok(()) => on_copied.emit(()),
                Err(err) => console.error(&format!("Failed to copy text: {err}")),
            }
        }));
    }
}
