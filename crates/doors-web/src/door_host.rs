#![forbid(unsafe_code)]

//! Binds [`DoorTransition`] to the page: applies its effects to the door
//! elements and drives its timers with `setTimeout`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use doors_core::config::DoorConfig;
use doors_core::door::{CLOSED_TRANSFORM, DoorEffect, DoorTransition};
use doors_core::ids::{
    DOOR_FRAME, DOOR_LEFT, DOOR_OPEN_CLASS, DOOR_RIGHT, NAV_HREF_ATTR, NAV_TARGET_ATTR,
    NAV_TRIGGER,
};
use doors_core::{Result, links};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, Window};
use web_time::Instant;

use crate::dom::{Listener, js_error};

pub struct DoorHost {
    window: Window,
    frame: Option<Element>,
    panels: Vec<HtmlElement>,
    door: RefCell<DoorTransition>,
    origin: Instant,
    timer: Closure<dyn FnMut()>,
    timeout: Cell<Option<i32>>,
}

impl DoorHost {
    pub fn new(window: Window, document: &Document, config: DoorConfig) -> Result<Rc<Self>> {
        let frame = document.query_selector(DOOR_FRAME).map_err(js_error)?;
        let panels = match &frame {
            Some(frame) => [DOOR_LEFT, DOOR_RIGHT]
                .into_iter()
                .filter_map(|sel| frame.query_selector(sel).ok().flatten())
                .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
                .collect(),
            None => Vec::new(),
        };
        let door = DoorTransition::new(config, frame.is_some());
        tracing::debug!(present = frame.is_some(), panels = panels.len(), "door: bound");

        Ok(Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let timer = Closure::<dyn FnMut()>::new(move || {
                if let Some(host) = weak.upgrade() {
                    host.timeout.set(None);
                    host.poll();
                }
            });
            Self {
                window,
                frame,
                panels,
                door: RefCell::new(door),
                origin: Instant::now(),
                timer,
                timeout: Cell::new(None),
            }
        }))
    }

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Open the door once the first frame with the closed styles is painted.
    pub fn on_load(self: &Rc<Self>) {
        if !self.door.borrow().is_present() {
            return;
        }
        let host = Rc::clone(self);
        let callback = Closure::once_into_js(move |_ts: f64| {
            let effects = host.door.borrow_mut().on_load(host.now());
            host.apply(effects);
            host.arm();
        });
        if let Err(err) = self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            tracing::warn!(error = %js_error(err), "door: could not wait for first frame");
        }
    }

    /// Leave the page for `url` through the door.
    pub fn navigate(&self, url: &str) {
        let effects = self.door.borrow_mut().navigate(self.now(), url);
        self.apply(effects);
        self.arm();
    }

    /// A navigation trigger was clicked.
    pub fn activate_link(&self, explicit: Option<&str>, natural: Option<&str>) {
        let effects = links::activate(&mut self.door.borrow_mut(), self.now(), explicit, natural);
        self.apply(effects);
        self.arm();
    }

    /// Route clicks on every navigation trigger through the door.
    pub fn wire_links(self: &Rc<Self>, document: &Document) -> Result<Vec<Listener>> {
        let nodes = document.query_selector_all(NAV_TRIGGER).map_err(js_error)?;
        let mut listeners = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(link) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let host = Rc::clone(self);
            let target = link.clone();
            listeners.push(Listener::new(&link, "click", move |event: Event| {
                event.prevent_default();
                host.activate_link(
                    target.get_attribute(NAV_TARGET_ATTR).as_deref(),
                    target.get_attribute(NAV_HREF_ATTR).as_deref(),
                );
            })?);
        }
        tracing::debug!(links = listeners.len(), "door: links wired");
        Ok(listeners)
    }

    fn poll(&self) {
        let effects = self.door.borrow_mut().poll(self.now());
        self.apply(effects);
        self.arm();
    }

    fn apply(&self, effects: Vec<DoorEffect>) {
        for effect in effects {
            match effect {
                DoorEffect::Open => {
                    if let Some(frame) = &self.frame {
                        if let Err(err) = frame.class_list().add_1(DOOR_OPEN_CLASS) {
                            tracing::warn!(error = %js_error(err), "door: open failed");
                        }
                    }
                }
                DoorEffect::ClosePanels { transition } => {
                    let css = DoorEffect::transition_css(transition);
                    for panel in &self.panels {
                        let style = panel.style();
                        let applied = style
                            .set_property("transition", &css)
                            .and_then(|()| style.set_property("transform", CLOSED_TRANSFORM));
                        if let Err(err) = applied {
                            tracing::warn!(error = %js_error(err), "door: close failed");
                        }
                    }
                }
                DoorEffect::Navigate(url) => {
                    tracing::info!(%url, "door: navigating");
                    if let Err(err) = self.window.location().set_href(&url) {
                        tracing::error!(%url, error = %js_error(err), "door: navigation failed");
                    }
                }
            }
        }
    }

    /// (Re)arm the timeout for the next pending deadline.
    fn arm(&self) {
        if let Some(id) = self.timeout.take() {
            self.window.clear_timeout_with_handle(id);
        }
        let Some(deadline) = self.door.borrow().next_deadline() else {
            return;
        };
        let delay = deadline.saturating_sub(self.now());
        let millis = (delay.as_secs_f64() * 1000.0).ceil().min(f64::from(i32::MAX)) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.timer.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(id) => self.timeout.set(Some(id)),
            Err(err) => tracing::warn!(error = %js_error(err), "door: timer refused"),
        }
    }
}
