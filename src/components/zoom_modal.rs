use crate::platform::ElementRef;

use super::dialog::VISIBLE_CLASS;

/// Full-screen image viewer.
pub struct ZoomModal {
    modal: Option<ElementRef>,
    image: Option<ElementRef>,
    caption: Option<ElementRef>,
    body: Option<ElementRef>,
}

impl ZoomModal {
    pub fn new(
        modal: Option<ElementRef>,
        image: Option<ElementRef>,
        caption: Option<ElementRef>,
        body: Option<ElementRef>,
    ) -> Self {
        Self {
            modal,
            image,
            caption,
            body,
        }
    }

    /// Replaces whatever is currently shown; there is no queue.
    pub fn open(&self, src: &str, caption: &str) {
        let (Some(modal), Some(image)) = (&self.modal, &self.image) else {
            return;
        };
        image.set_attribute("src", src);
        if let Some(el) = &self.caption {
            el.set_text(caption);
        }
        modal.add_class(VISIBLE_CLASS);
        self.set_page_overflow("hidden");
    }

    pub fn close(&self) {
        let Some(modal) = &self.modal else {
            return;
        };
        modal.remove_class(VISIBLE_CLASS);
        self.set_page_overflow("auto");
        // drop the (possibly large) image
        if let Some(image) = &self.image {
            image.set_attribute("src", "");
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal
            .as_ref()
            .is_some_and(|m| m.has_class(VISIBLE_CLASS))
    }

    fn set_page_overflow(&self, value: &str) {
        if let Some(body) = &self.body {
            body.set_style_property("overflow", value);
        }
    }
}
