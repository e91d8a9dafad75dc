use crate::platform::ElementRef;

pub const VISIBLE_CLASS: &str = "visible";

/// The "Command Copied" confirmation: a scrim plus the dialog container.
#[derive(Clone)]
pub struct Dialog {
    scrim: Option<ElementRef>,
    container: Option<ElementRef>,
}

impl Dialog {
    pub fn new(scrim: Option<ElementRef>, container: Option<ElementRef>) -> Self {
        Self { scrim, container }
    }

    pub fn show(&self) {
        if let (Some(scrim), Some(container)) = (&self.scrim, &self.container) {
            scrim.add_class(VISIBLE_CLASS);
            container.add_class(VISIBLE_CLASS);
        }
    }

    pub fn hide(&self) {
        if let (Some(scrim), Some(container)) = (&self.scrim, &self.container) {
            scrim.remove_class(VISIBLE_CLASS);
            container.remove_class(VISIBLE_CLASS);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.container
            .as_ref()
            .is_some_and(|c| c.has_class(VISIBLE_CLASS))
    }
}
