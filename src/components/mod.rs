pub mod clipboard;
pub mod dialog;
pub mod music;
pub mod social;
pub mod title_rotator;
pub mod zoom_modal;

pub use clipboard::ClipboardCopier;
pub use dialog::Dialog;
pub use music::{FirstInteraction, MusicController};
pub use social::SocialRouter;
pub use title_rotator::TitleRotator;
pub use zoom_modal::ZoomModal;
