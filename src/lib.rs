//! Page enhancements for the Player42 toolkit site: glitching title rotation,
//! copy-to-clipboard with a confirmation dialog, social links, an image zoom
//! modal and background music controls.
//!
//! The wasm start hook boots everything once the document has loaded. The
//! functions the page's inline handlers call are exported through
//! `wasm-bindgen` and also installed on `window` under the same names.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod model;
pub mod platform;
pub mod state;
mod util;

#[cfg(test)]
mod testing;

use app::Toolkit;
use model::SiteConfig;
use util::{cerror, clog, describe_js};

thread_local! {
    static TOOLKIT: RefCell<Option<Rc<Toolkit>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn wasm_start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    // The module may finish loading after DOMContentLoaded has already fired.
    if document.ready_state() == "loading" {
        let on_loaded = Closure::once_into_js(move || {
            if let Err(e) = boot() {
                cerror(&format!("toolkit boot failed: {}", describe_js(&e)));
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_loaded.unchecked_ref())?;
        Ok(())
    } else {
        boot()
    }
}

fn boot() -> Result<(), JsValue> {
    if current().is_some() {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let host = platform::web::browser_host(&window)?;
    let config = SiteConfig::load(&*host.document, &*host.console);
    let toolkit = Rc::new(Toolkit::new(host, config));
    // Globals go in first so a failure here leaves boot retryable.
    install_page_functions(&window)?;
    toolkit.init();
    TOOLKIT.with(|slot| *slot.borrow_mut() = Some(toolkit));
    clog("toolkit ready");
    Ok(())
}

fn current() -> Option<Rc<Toolkit>> {
    TOOLKIT.with(|slot| slot.borrow().clone())
}

// Calls made before boot (e.g. a click while the module is still loading) are dropped.
fn with_toolkit(f: impl FnOnce(&Toolkit)) {
    if let Some(toolkit) = current() {
        f(&toolkit);
    }
}

/// Inline `onclick="..."` handlers resolve names on `window`.
fn install_page_functions(window: &web_sys::Window) -> Result<(), JsValue> {
    let one_arg: [(&str, fn(String)); 3] = [
        ("copyToClipboard", |id| copy_to_clipboard(&id)),
        ("copyCommand", |id| copy_command(&id)),
        ("goToSocialLink", |platform| go_to_social_link(&platform)),
    ];
    for (name, f) in one_arg {
        let cb = Closure::wrap(Box::new(f) as Box<dyn Fn(String)>);
        Reflect::set(window, &JsValue::from_str(name), &cb.into_js_value())?;
    }

    let no_arg: [(&str, fn()); 4] = [
        ("closeZoom", close_zoom),
        ("showDialog", show_dialog),
        ("closeDialog", close_dialog),
        ("toggleMusic", toggle_music),
    ];
    for (name, f) in no_arg {
        let cb = Closure::wrap(Box::new(f) as Box<dyn Fn()>);
        Reflect::set(window, &JsValue::from_str(name), &cb.into_js_value())?;
    }

    let open = Closure::wrap(
        Box::new(|src: String, caption: String| open_zoom(&src, &caption))
            as Box<dyn Fn(String, String)>,
    );
    Reflect::set(window, &JsValue::from_str("openZoom"), &open.into_js_value())?;
    Ok(())
}

#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(element_id: &str) {
    with_toolkit(|t| t.copier.copy(element_id));
}

#[wasm_bindgen(js_name = copyCommand)]
pub fn copy_command(element_id: &str) {
    copy_to_clipboard(element_id);
}

#[wasm_bindgen(js_name = goToSocialLink)]
pub fn go_to_social_link(platform: &str) {
    with_toolkit(|t| {
        t.social.open(platform);
    });
}

#[wasm_bindgen(js_name = openZoom)]
pub fn open_zoom(src: &str, caption: &str) {
    with_toolkit(|t| t.zoom.open(src, caption));
}

#[wasm_bindgen(js_name = closeZoom)]
pub fn close_zoom() {
    with_toolkit(|t| t.zoom.close());
}

#[wasm_bindgen(js_name = showDialog)]
pub fn show_dialog() {
    with_toolkit(|t| t.dialog.show());
}

#[wasm_bindgen(js_name = closeDialog)]
pub fn close_dialog() {
    with_toolkit(|t| t.dialog.hide());
}

#[wasm_bindgen(js_name = toggleMusic)]
pub fn toggle_music() {
    with_toolkit(|t| t.music.toggle());
}
