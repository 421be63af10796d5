#![forbid(unsafe_code)]

//! DOM plumbing shared by the door host and the widgets.

use std::cell::RefCell;
use std::rc::Rc;

use doors_core::frame::FrameScheduler;
use doors_core::rng::RandomSource;
use doors_core::{DoorsError, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, Window};

/// Wrap a thrown JS value.
pub fn js_error(value: JsValue) -> DoorsError {
    let detail = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"));
    DoorsError::Host(detail)
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| DoorsError::Host("no global window".into()))
}

pub fn document(window: &Window) -> Result<Document> {
    window
        .document()
        .ok_or_else(|| DoorsError::Host("window has no document".into()))
}

/// Look up `#id` and cast it. A missing element, or one of the wrong kind,
/// is a [`DoorsError::MissingElement`] for `widget`.
pub fn element_by_id<T: JsCast>(
    document: &Document,
    widget: &'static str,
    id: &'static str,
) -> Result<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or(DoorsError::MissingElement {
            widget,
            element: id,
        })
}

/// An event listener that is removed when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// `Math.random()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` for a single, reusable callback.
///
/// The callback is installed once with [`RafScheduler::set_callback`]; each
/// [`FrameScheduler::schedule`] queues it for the next frame.
#[derive(Clone)]
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_callback(&self, f: impl FnMut(f64) + 'static) {
        *self.callback.borrow_mut() = Some(Closure::new(f));
    }

    /// Drop the callback, breaking any reference it holds back to its owner.
    pub fn clear_callback(&self) {
        self.callback.borrow_mut().take();
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn schedule(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(error = %js_error(err), "raf: request refused");
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}
