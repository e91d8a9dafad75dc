// In-memory stand-ins for the page capabilities, used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::future::ready;
use std::rc::Rc;

use crate::platform::{
    AudioRef, AudioTrack, Clipboard, Console, Document, Element, ElementRef, Host, IconRenderer,
    ListenerId, LocalTask, Pending, Scheduler, TabOpener,
};

#[derive(Default)]
pub struct FakeElement {
    classes: RefCell<BTreeSet<String>>,
    text: RefCell<String>,
    attrs: RefCell<BTreeMap<String, String>>,
    styles: RefCell<BTreeMap<String, String>>,
    html: RefCell<String>,
    handlers: RefCell<Vec<(String, Rc<dyn Fn()>)>>,
}

impl FakeElement {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_text(text: &str) -> Rc<Self> {
        let el = Self::new();
        *el.text.borrow_mut() = text.to_owned();
        el
    }

    pub fn current_text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.attrs.borrow().get(name).cloned()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn html(&self) -> String {
        self.html.borrow().clone()
    }

    pub fn fire(&self, event: &str) {
        let handlers: Vec<_> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_owned());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn text(&self) -> String {
        self.current_text()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_owned();
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attrs
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_style_property(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_owned(), value.to_owned());
    }

    fn set_inner_html(&self, html: &str) {
        *self.html.borrow_mut() = html.to_owned();
    }

    fn on(&self, event: &str, handler: Rc<dyn Fn()>) {
        self.handlers.borrow_mut().push((event.to_owned(), handler));
    }
}

pub struct FakeAudio {
    paused: Cell<bool>,
    fail_play: Cell<bool>,
    play_requests: Cell<u32>,
}

impl FakeAudio {
    pub fn paused() -> Rc<Self> {
        Rc::new(Self {
            paused: Cell::new(true),
            fail_play: Cell::new(false),
            play_requests: Cell::new(0),
        })
    }

    pub fn playing() -> Rc<Self> {
        let audio = Self::paused();
        audio.paused.set(false);
        audio
    }

    pub fn reject_play(&self) {
        self.fail_play.set(true);
    }

    pub fn play_requests(&self) -> u32 {
        self.play_requests.get()
    }
}

impl AudioTrack for FakeAudio {
    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    fn pause(&self) {
        self.paused.set(true);
    }

    fn play(&self) -> Pending {
        self.play_requests.set(self.play_requests.get() + 1);
        if self.fail_play.get() {
            let err = anyhow::anyhow!("NotAllowedError: play() blocked");
            return Box::pin(ready(Err::<(), _>(err)));
        }
        self.paused.set(false);
        Box::pin(ready(Ok::<(), anyhow::Error>(())))
    }
}

pub struct FakeDocument {
    elements: RefCell<HashMap<String, Rc<FakeElement>>>,
    audio: RefCell<HashMap<String, Rc<FakeAudio>>>,
    cards: RefCell<Vec<Rc<FakeElement>>>,
    pub body_el: Rc<FakeElement>,
    listeners: RefCell<BTreeMap<ListenerId, (String, Rc<dyn Fn()>)>>,
    next_id: Cell<u32>,
}

impl FakeDocument {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            elements: RefCell::new(HashMap::new()),
            audio: RefCell::new(HashMap::new()),
            cards: RefCell::new(Vec::new()),
            body_el: FakeElement::new(),
            listeners: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(0),
        })
    }

    pub fn insert(&self, id: &str, el: Rc<FakeElement>) -> Rc<FakeElement> {
        self.elements.borrow_mut().insert(id.to_owned(), el.clone());
        el
    }

    pub fn insert_audio(&self, id: &str, audio: Rc<FakeAudio>) -> Rc<FakeAudio> {
        self.audio.borrow_mut().insert(id.to_owned(), audio.clone());
        audio
    }

    pub fn add_card(&self) -> Rc<FakeElement> {
        let card = FakeElement::new();
        self.cards.borrow_mut().push(card.clone());
        card
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn dispatch(&self, event: &str) {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .values()
            .filter(|(name, _)| name == event)
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }
}

impl Document for FakeDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.elements
            .borrow()
            .get(id)
            .map(|el| el.clone() as ElementRef)
    }

    fn audio_by_id(&self, id: &str) -> Option<AudioRef> {
        self.audio.borrow().get(id).map(|a| a.clone() as AudioRef)
    }

    fn body(&self) -> Option<ElementRef> {
        Some(self.body_el.clone() as ElementRef)
    }

    fn select_all(&self, selector: &str) -> Vec<ElementRef> {
        if selector != ".ui-card" {
            return Vec::new();
        }
        self.cards
            .borrow()
            .iter()
            .map(|c| c.clone() as ElementRef)
            .collect()
    }

    fn listen(&self, event: &str, handler: Rc<dyn Fn()>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .insert(id, (event.to_owned(), handler));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Log,
    Warn,
    Error,
}

#[derive(Default)]
pub struct RecordingConsole {
    entries: RefCell<Vec<(Level, String)>>,
}

impl RecordingConsole {
    fn at(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::Warn)
    }

    pub fn errors(&self) -> Vec<String> {
        self.at(Level::Error)
    }
}

impl Console for RecordingConsole {
    fn log(&self, msg: &str) {
        self.entries.borrow_mut().push((Level::Log, msg.to_owned()));
    }

    fn warn(&self, msg: &str) {
        self.entries.borrow_mut().push((Level::Warn, msg.to_owned()));
    }

    fn error(&self, msg: &str) {
        self.entries.borrow_mut().push((Level::Error, msg.to_owned()));
    }
}

enum Job {
    Once(Box<dyn FnOnce()>),
    Every(u32, Box<dyn FnMut()>),
}

struct Timer {
    due: u64,
    seq: u64,
    job: Job,
}

/// Virtual clock: timers fire only when the test advances time, spawned
/// futures run on `run_tasks` (and after every fired timer).
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    tasks: RefCell<VecDeque<LocalTask>>,
}

impl ManualScheduler {
    fn push(&self, due: u64, job: Job) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer { due, seq, job });
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn run_tasks(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => futures::executor::block_on(task),
                None => break,
            }
        }
    }

    pub fn advance_by(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = self
                .timers
                .borrow()
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= target)
                .min_by_key(|(_, t)| (t.due, t.seq))
                .map(|(i, _)| i);
            let Some(idx) = next else { break };
            let timer = self.timers.borrow_mut().remove(idx);
            self.now.set(timer.due);
            match timer.job {
                Job::Once(task) => task(),
                Job::Every(period, mut task) => {
                    task();
                    self.push(timer.due + u64::from(period), Job::Every(period, task));
                }
            }
            self.run_tasks();
        }
        self.now.set(target);
        self.run_tasks();
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.push(self.now.get() + u64::from(delay_ms), Job::Once(task));
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) {
        self.push(self.now.get() + u64::from(period_ms), Job::Every(period_ms, task));
    }

    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}

#[derive(Default)]
pub struct CountingIcons {
    renders: Cell<u32>,
}

impl CountingIcons {
    pub fn renders(&self) -> u32 {
        self.renders.get()
    }
}

impl IconRenderer for CountingIcons {
    fn render_icons(&self) {
        self.renders.set(self.renders.get() + 1);
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    writes: RefCell<Vec<String>>,
    denied: Cell<bool>,
}

impl FakeClipboard {
    pub fn deny(&self) {
        self.denied.set(true);
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: &str) -> Pending {
        self.writes.borrow_mut().push(text.to_owned());
        if self.denied.get() {
            let err = anyhow::anyhow!("NotAllowedError: Write permission denied.");
            return Box::pin(ready(Err::<(), _>(err)));
        }
        Box::pin(ready(Ok::<(), anyhow::Error>(())))
    }
}

#[derive(Default)]
pub struct FakeTabs {
    opened: RefCell<Vec<String>>,
    blocked: Cell<bool>,
}

impl FakeTabs {
    pub fn block(&self) {
        self.blocked.set(true);
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl TabOpener for FakeTabs {
    fn open_tab(&self, url: &str) -> anyhow::Result<()> {
        if self.blocked.get() {
            anyhow::bail!("the browser blocked the new tab");
        }
        self.opened.borrow_mut().push(url.to_owned());
        Ok(())
    }
}

pub struct TestPage {
    pub document: Rc<FakeDocument>,
    pub console: Rc<RecordingConsole>,
    pub scheduler: Rc<ManualScheduler>,
    pub icons: Rc<CountingIcons>,
    pub clipboard: Rc<FakeClipboard>,
    pub tabs: Rc<FakeTabs>,
}

impl TestPage {
    pub fn new() -> Self {
        Self {
            document: FakeDocument::new(),
            console: Rc::default(),
            scheduler: Rc::default(),
            icons: Rc::default(),
            clipboard: Rc::default(),
            tabs: Rc::default(),
        }
    }

    pub fn host(&self) -> Host {
        Host {
            document: self.document.clone(),
            console: self.console.clone(),
            scheduler: self.scheduler.clone(),
            icons: self.icons.clone(),
            clipboard: self.clipboard.clone(),
            tabs: self.tabs.clone(),
        }
    }
}
