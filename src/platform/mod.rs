//! Capabilities the controllers need from the page.
//!
//! Every controller talks to the browser through these traits so the same
//! logic runs against the real DOM (see [`web`]) and against in-memory fakes
//! in tests.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub mod web;

/// A fire-and-forget unit of work for the local executor.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// An asynchronous platform call that may be rejected (clipboard, playback).
pub type Pending = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;

/// A bound element in the presentation tree.
pub trait Element {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Rendered text of the element.
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    fn set_attribute(&self, name: &str, value: &str);
    fn set_style_property(&self, property: &str, value: &str);
    fn set_inner_html(&self, html: &str);
    /// Attaches a listener for the lifetime of the page.
    fn on(&self, event: &str, handler: Rc<dyn Fn()>);
}

pub type ElementRef = Rc<dyn Element>;

/// Media element backing the background music.
pub trait AudioTrack {
    fn is_paused(&self) -> bool;
    fn pause(&self);
    fn play(&self) -> Pending;
}

pub type AudioRef = Rc<dyn AudioTrack>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

pub trait Document {
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;
    fn audio_by_id(&self, id: &str) -> Option<AudioRef>;
    fn body(&self) -> Option<ElementRef>;
    fn select_all(&self, selector: &str) -> Vec<ElementRef>;
    /// Document-level listener that can later be removed with [`Document::unlisten`].
    fn listen(&self, event: &str, handler: Rc<dyn Fn()>) -> ListenerId;
    fn unlisten(&self, id: ListenerId);
}

pub trait Console {
    fn log(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Timers and the local executor.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>);
    fn spawn(&self, task: LocalTask);
}

/// Renders icon placeholders (`<i data-lucide=...>`) into glyphs.
pub trait IconRenderer {
    fn render_icons(&self);
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Pending;
}

pub trait TabOpener {
    fn open_tab(&self, url: &str) -> anyhow::Result<()>;
}

/// Everything a [`crate::app::Toolkit`] is wired against.
#[derive(Clone)]
pub struct Host {
    pub document: Rc<dyn Document>,
    pub console: Rc<dyn Console>,
    pub scheduler: Rc<dyn Scheduler>,
    pub icons: Rc<dyn IconRenderer>,
    pub clipboard: Rc<dyn Clipboard>,
    pub tabs: Rc<dyn TabOpener>,
}
