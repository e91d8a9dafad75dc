//! Browser implementations of the page capabilities, on top of `web-sys`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::bail;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, HtmlMediaElement, Window};

use super::{
    AudioRef, AudioTrack, Clipboard, Console, Document, Element, ElementRef, Host, IconRenderer,
    ListenerId, LocalTask, Pending, Scheduler, TabOpener,
};
use crate::util::{cerror, clog, cwarn, describe_js, js_error};

pub struct DomElement(web_sys::Element);

impl Element for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn text(&self) -> String {
        match self.0.dyn_ref::<HtmlElement>() {
            Some(el) => el.inner_text(),
            None => self.0.text_content().unwrap_or_default(),
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_style_property(&self, property: &str, value: &str) {
        if let Some(el) = self.0.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn on(&self, event: &str, handler: Rc<dyn Fn()>) {
        let cb = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        if let Err(e) = self
            .0
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        {
            cerror(&format!("failed to bind {event}: {}", describe_js(&e)));
        }
        // lives as long as the page
        cb.forget();
    }
}

pub struct DomAudio(HtmlMediaElement);

impl AudioTrack for DomAudio {
    fn is_paused(&self) -> bool {
        self.0.paused()
    }

    fn pause(&self) {
        let _ = self.0.pause();
    }

    fn play(&self) -> Pending {
        let promise = self.0.play();
        Box::pin(async move {
            let promise = promise.map_err(js_error)?;
            JsFuture::from(promise).await.map_err(js_error)?;
            Ok::<(), anyhow::Error>(())
        })
    }
}

pub struct BrowserDocument {
    document: web_sys::Document,
    listeners: RefCell<HashMap<ListenerId, (String, Closure<dyn FnMut()>)>>,
    next_id: Cell<u32>,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }
}

impl Document for BrowserDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.document
            .get_element_by_id(id)
            .map(|el| Rc::new(DomElement(el)) as ElementRef)
    }

    fn audio_by_id(&self, id: &str) -> Option<AudioRef> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
            .map(|el| Rc::new(DomAudio(el)) as AudioRef)
    }

    fn body(&self) -> Option<ElementRef> {
        self.document
            .body()
            .map(|el| Rc::new(DomElement(el.into())) as ElementRef)
    }

    fn select_all(&self, selector: &str) -> Vec<ElementRef> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(|el| Rc::new(DomElement(el)) as ElementRef)
            .collect()
    }

    fn listen(&self, event: &str, handler: Rc<dyn Fn()>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let cb = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        if let Err(e) = self
            .document
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        {
            cerror(&format!("failed to listen for {event}: {}", describe_js(&e)));
        }
        self.listeners
            .borrow_mut()
            .insert(id, (event.to_owned(), cb));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        // Removal may happen from inside the listener itself; wasm-bindgen defers
        // freeing the closure until that call returns.
        let Some((event, cb)) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        let _ = self
            .document
            .remove_event_listener_with_callback(&event, cb.as_ref().unchecked_ref());
        drop(cb);
    }
}

pub struct BrowserConsole;

impl Console for BrowserConsole {
    fn log(&self, msg: &str) {
        clog(msg);
    }

    fn warn(&self, msg: &str) {
        cwarn(msg);
    }

    fn error(&self, msg: &str) {
        cerror(msg);
    }
}

pub struct BrowserScheduler {
    window: Window,
}

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let cb = Closure::once_into_js(move || task());
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            )
        {
            cerror(&format!("setTimeout failed: {}", describe_js(&e)));
        }
    }

    fn every(&self, period_ms: u32, mut task: Box<dyn FnMut()>) {
        let tick = Closure::wrap(Box::new(move || task()) as Box<dyn FnMut()>);
        if let Err(e) = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                i32::try_from(period_ms).unwrap_or(i32::MAX),
            )
        {
            cerror(&format!("setInterval failed: {}", describe_js(&e)));
        }
        // interval is never cleared
        tick.forget();
    }

    fn spawn(&self, task: LocalTask) {
        yew::platform::spawn_local(task);
    }
}

/// Calls `window.lucide.createIcons()` when the icon library is loaded.
pub struct LucideIcons {
    window: Window,
}

impl IconRenderer for LucideIcons {
    fn render_icons(&self) {
        let Ok(lucide) = Reflect::get(&self.window, &JsValue::from_str("lucide")) else {
            return;
        };
        if lucide.is_undefined() || lucide.is_null() {
            return;
        }
        let create = Reflect::get(&lucide, &JsValue::from_str("createIcons"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        if let Some(create) = create {
            if let Err(e) = create.call0(&lucide) {
                cwarn(&format!("lucide.createIcons failed: {}", describe_js(&e)));
            }
        }
    }
}

pub struct BrowserClipboard {
    window: Window,
}

impl BrowserClipboard {
    // `navigator.clipboard` is looked up dynamically; it is absent on insecure origins.
    fn write_promise(&self, text: &str) -> anyhow::Result<Promise> {
        let navigator = self.window.navigator();
        let clipboard =
            Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(js_error)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            bail!("clipboard API unavailable");
        }
        let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(js_error)?;
        write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(js_error)?
            .dyn_into::<Promise>()
            .map_err(js_error)
    }
}

impl Clipboard for BrowserClipboard {
    fn write_text(&self, text: &str) -> Pending {
        let promise = self.write_promise(text);
        Box::pin(async move {
            JsFuture::from(promise?).await.map_err(js_error)?;
            Ok::<(), anyhow::Error>(())
        })
    }
}

pub struct BrowserTabs {
    window: Window,
}

impl TabOpener for BrowserTabs {
    fn open_tab(&self, url: &str) -> anyhow::Result<()> {
        match self.window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => Ok(()),
            Ok(None) => bail!("the browser blocked the new tab"),
            Err(e) => Err(js_error(e)),
        }
    }
}

/// Wires every capability to the live `window`.
pub fn browser_host(window: &Window) -> Result<Host, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    Ok(Host {
        document: Rc::new(BrowserDocument::new(document)),
        console: Rc::new(BrowserConsole),
        scheduler: Rc::new(BrowserScheduler {
            window: window.clone(),
        }),
        icons: Rc::new(LucideIcons {
            window: window.clone(),
        }),
        clipboard: Rc::new(BrowserClipboard {
            window: window.clone(),
        }),
        tabs: Rc::new(BrowserTabs {
            window: window.clone(),
        }),
    })
}
