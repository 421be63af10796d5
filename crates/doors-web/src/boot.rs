//! Entry points: boot on DOM ready, and the exported `navigate`.

use std::cell::RefCell;
use std::rc::Rc;

use doors_core::ids::{CONFIG_SCRIPT, PAGE_ATTR};
use doors_core::{DoorsConfig, Result, page};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event};

use crate::console;
use crate::dom::{self, Listener, js_error};
use crate::door_host::DoorHost;
use crate::widgets::{DomInitializers, MountedWidget};

/// Everything the booted page keeps alive.
struct Page {
    door: Rc<DoorHost>,
    _links: Vec<Listener>,
    _widget: Option<MountedWidget>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Module start: install logging and boot once the document is parsed.
#[wasm_bindgen(start)]
pub fn start() {
    console::install();
    if let Err(err) = when_ready() {
        tracing::error!(%err, "boot: could not schedule");
    }
}

fn when_ready() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    if page::ready_to_boot(&document.ready_state()) {
        run_boot();
        return Ok(());
    }
    let callback = Closure::once_into_js(move |_event: Event| run_boot());
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(js_error)
}

fn run_boot() {
    if let Err(err) = boot() {
        tracing::error!(%err, "boot failed");
    }
}

fn boot() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let config = load_config(&document);

    let door = DoorHost::new(window.clone(), &document, config.door.clone())?;
    door.on_load();
    let links = door.wire_links(&document)?;

    let page_id = document.body().and_then(|body| body.get_attribute(PAGE_ATTR));
    let mut init = DomInitializers::new(window, document, config);
    let widget = page::dispatch(page_id.as_deref(), &mut init);

    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(Page {
            door,
            _links: links,
            _widget: widget,
        });
    });
    tracing::info!(page = page_id.as_deref().unwrap_or(""), "boot: ready");
    Ok(())
}

/// Read overrides from `<script type="application/json" id="doors-config">`.
/// A missing script means defaults; an invalid one is logged and ignored.
fn load_config(document: &Document) -> DoorsConfig {
    let Some(script) = document.get_element_by_id(CONFIG_SCRIPT) else {
        return DoorsConfig::default();
    };
    let raw = script.text_content().unwrap_or_default();
    match DoorsConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "config: ignoring overrides");
            DoorsConfig::default()
        }
    }
}

/// Leave the page for `url`, closing the door first if there is one.
#[wasm_bindgen]
pub fn navigate(url: &str) {
    let door = PAGE.with(|slot| slot.borrow().as_ref().map(|page| Rc::clone(&page.door)));
    match door {
        Some(door) => door.navigate(url),
        None => {
            tracing::debug!(%url, "navigate: page not booted, leaving directly");
            let result = dom::window().and_then(|w| w.location().set_href(url).map_err(js_error));
            if let Err(err) = result {
                tracing::error!(%url, %err, "navigate failed");
            }
        }
    }
}
