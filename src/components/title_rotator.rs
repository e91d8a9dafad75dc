use std::cell::Cell;
use std::rc::Rc;

use crate::model::TitleEntry;
use crate::platform::{ElementRef, Scheduler};
use crate::state::GlitchPhase;

/// Cycles the main title through the configured entries with a glitch
/// transition. Inert when the title element is missing.
#[derive(Clone)]
pub struct TitleRotator {
    inner: Rc<Inner>,
}

struct Inner {
    display: Option<ElementRef>,
    titles: Vec<TitleEntry>,
    period_ms: u32,
    scheduler: Rc<dyn Scheduler>,
    cursor: Cell<usize>,
    phase: Cell<GlitchPhase>,
    started: Cell<bool>,
}

impl TitleRotator {
    pub fn new(
        display: Option<ElementRef>,
        titles: Vec<TitleEntry>,
        period_ms: u32,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                display,
                titles,
                period_ms,
                scheduler,
                cursor: Cell::new(0),
                phase: Cell::new(GlitchPhase::Idle),
                started: Cell::new(false),
            }),
        }
    }

    /// Index of the entry the next `advance` will show.
    pub fn cursor(&self) -> usize {
        self.inner.cursor.get()
    }

    pub fn phase(&self) -> GlitchPhase {
        self.inner.phase.get()
    }

    pub fn reset(&self) {
        self.inner.cursor.set(0);
    }

    /// Shows the first entry now, then rotates every period. Later calls are ignored.
    pub fn start(&self) {
        if self.inner.display.is_none() || self.inner.titles.is_empty() {
            return;
        }
        if self.inner.started.replace(true) {
            return;
        }
        self.advance();
        let rotator = self.clone();
        self.inner
            .scheduler
            .every(self.inner.period_ms, Box::new(move || rotator.advance()));
    }

    pub fn advance(&self) {
        let Some(display) = self.inner.display.clone() else {
            return;
        };
        let len = self.inner.titles.len();
        if len == 0 {
            return;
        }
        let idx = self.inner.cursor.get();
        let entry = Rc::new(self.inner.titles[idx].clone());
        self.inner.cursor.set((idx + 1) % len);
        Inner::enter(&self.inner, display, GlitchPhase::FlickeringOut, entry);
    }
}

impl Inner {
    fn enter(this: &Rc<Self>, display: ElementRef, phase: GlitchPhase, entry: Rc<TitleEntry>) {
        phase.apply(&*display, &entry);
        this.phase.set(phase);
        if let Some((delay, next)) = phase.next() {
            let inner = this.clone();
            this.scheduler.after(
                delay,
                Box::new(move || Inner::enter(&inner, display, next, entry)),
            );
        }
    }
}
