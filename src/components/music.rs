use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::platform::{
    AudioRef, Console, Document, ElementRef, IconRenderer, ListenerId, Scheduler,
};

pub const MUTED_ICON: &str = r#"<i data-lucide="volume-x"></i>"#;
pub const UNMUTED_ICON: &str = r#"<i data-lucide="volume-2"></i>"#;
pub const FIRST_INTERACTION_EVENTS: [&str; 2] = ["click", "keydown"];

/// Background music toggle. Play state is read back from the audio element.
pub struct MusicController {
    audio: Option<AudioRef>,
    button: Option<ElementRef>,
    icons: Rc<dyn IconRenderer>,
    console: Rc<dyn Console>,
    scheduler: Rc<dyn Scheduler>,
}

impl MusicController {
    pub fn new(
        audio: Option<AudioRef>,
        button: Option<ElementRef>,
        icons: Rc<dyn IconRenderer>,
        console: Rc<dyn Console>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            audio,
            button,
            icons,
            console,
            scheduler,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.audio.as_ref().is_some_and(|a| !a.is_paused())
    }

    pub fn toggle(&self) {
        let (Some(audio), Some(button)) = (&self.audio, &self.button) else {
            return;
        };
        if audio.is_paused() {
            let pending = audio.play();
            let console = self.console.clone();
            self.scheduler.spawn(Box::pin(async move {
                if let Err(err) = pending.await {
                    console.error(&format!("Audio playback failed: {err}"));
                }
            }));
            button.set_inner_html(UNMUTED_ICON);
        } else {
            audio.pause();
            button.set_inner_html(MUTED_ICON);
        }
        self.icons.render_icons();
    }

    /// Hooks the toggle button's click for the lifetime of the page.
    pub fn bind_button(self: &Rc<Self>) {
        let Some(button) = &self.button else {
            return;
        };
        let music = Rc::downgrade(self);
        button.on(
            "click",
            Rc::new(move || {
                if let Some(music) = music.upgrade() {
                    music.toggle();
                }
            }),
        );
    }

    // Browsers reject unsolicited playback; a rejection here is expected.
    fn play_if_paused(&self) {
        let Some(audio) = &self.audio else {
            return;
        };
        if audio.is_paused() {
            let pending = audio.play();
            self.scheduler.spawn(Box::pin(async move {
                let _ = pending.await;
            }));
        }
    }
}

/// One-shot autoplay attempt on the first click or keypress anywhere on the page.
pub struct FirstInteraction {
    music: Rc<MusicController>,
    document: Rc<dyn Document>,
    listeners: RefCell<Vec<ListenerId>>,
    fired: Cell<bool>,
}

impl FirstInteraction {
    pub fn arm(music: Rc<MusicController>, document: Rc<dyn Document>) -> Rc<Self> {
        let gate = Rc::new(Self {
            music,
            document: document.clone(),
            listeners: RefCell::new(Vec::new()),
            fired: Cell::new(false),
        });
        for event in FIRST_INTERACTION_EVENTS {
            let weak: Weak<Self> = Rc::downgrade(&gate);
            let id = document.listen(
                event,
                Rc::new(move || {
                    if let Some(gate) = weak.upgrade() {
                        gate.attempt_autoplay_once();
                    }
                }),
            );
            gate.listeners.borrow_mut().push(id);
        }
        gate
    }

    pub fn attempt_autoplay_once(&self) {
        if self.fired.replace(true) {
            return;
        }
        self.music.play_if_paused();
        let listeners = self.listeners.take();
        for id in listeners {
            self.document.unlisten(id);
        }
    }

    pub fn is_armed(&self) -> bool {
        !self.fired.get()
    }
}
