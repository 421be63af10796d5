#![forbid(unsafe_code)]

//! DOM bindings for the five page widgets.
//!
//! Each initializer looks up its elements, builds the core widget, wires
//! listeners and returns a [`MountedWidget`] that owns all of it. Dropping the
//! handle removes the listeners and stops any frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use doors_core::cone::{ConeAnimation, format_marker};
use doors_core::dissolve::{DissolveWidget, parse_level};
use doors_core::frame::RunLoop;
use doors_core::garden::{ParticleGarden, parse_growth};
use doors_core::ids::{
    CONE_MARKER, CONE_MARKER_ATTR, CONE_PAUSE, CONE_PLAY, CONE_SURFACE, DISSOLVE_CANVAS,
    DISSOLVE_ENTROPY, GARDEN_CANVAS, GARDEN_GROWTH, OBSERVER_BUTTON, OBSERVER_STATE,
    TOGGLE_CHECKBOX, TOGGLE_COPENHAGEN, TOGGLE_MANY_WORLDS,
};
use doors_core::observer::BinaryState;
use doors_core::page::WidgetInitializers;
use doors_core::toggle::{DisplayToggle, ToggleLayout};
use doors_core::{DoorsConfig, DoorsError, Result};
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlInputElement, Window};

use crate::canvas::CanvasSurface;
use crate::dom::{Listener, MathRandom, RafScheduler, element_by_id, js_error};

/// A live widget: its listeners plus whatever must happen on teardown.
pub struct MountedWidget {
    widget: &'static str,
    _listeners: Vec<Listener>,
    on_drop: Option<Box<dyn FnOnce()>>,
}

impl MountedWidget {
    fn new(widget: &'static str, listeners: Vec<Listener>) -> Self {
        Self {
            widget,
            _listeners: listeners,
            on_drop: None,
        }
    }

    fn on_drop(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        if let Some(f) = self.on_drop.take() {
            f();
        }
        tracing::debug!(widget = self.widget, "widget unmounted");
    }
}

// ============================================================================
// Garden
// ============================================================================

struct GardenLoop {
    garden: ParticleGarden<MathRandom>,
    surface: CanvasSurface,
    growth: HtmlInputElement,
    run: RunLoop<i32>,
    frames: RafScheduler,
}

impl GardenLoop {
    fn render(&mut self) {
        let growth = parse_growth(&self.growth.value());
        self.garden.frame(growth, &mut self.surface);
    }

    fn tick(&mut self) {
        if self.run.on_frame(&mut self.frames) {
            self.render();
        }
    }

    fn stop(&mut self) {
        self.run.stop(&mut self.frames);
        self.frames.clear_callback();
    }
}

// ============================================================================
// Dissolve
// ============================================================================

struct DissolveView {
    widget: DissolveWidget<MathRandom>,
    surface: CanvasSurface,
}

impl DissolveView {
    fn draw(&mut self, level: u8) {
        if let Err(err) = self.widget.draw(level, &mut self.surface) {
            tracing::warn!(%err, level, "dissolve: draw failed");
        }
    }
}

// ============================================================================
// Cone
// ============================================================================

struct ConeLoop {
    cone: ConeAnimation<i32>,
    frames: RafScheduler,
    marker: Element,
}

impl ConeLoop {
    fn tick(&mut self) {
        let Some(y) = self.cone.frame(&mut self.frames) else {
            return;
        };
        if let Err(err) = self
            .marker
            .set_attribute(CONE_MARKER_ATTR, &format_marker(y))
        {
            tracing::warn!(error = %js_error(err), "cone: marker update failed");
        }
    }

    fn stop(&mut self) {
        self.cone.pause(&mut self.frames);
        self.frames.clear_callback();
    }
}

// ============================================================================
// Toggle
// ============================================================================

fn apply_layout(many_worlds: &HtmlElement, copenhagen: &HtmlElement, layout: ToggleLayout) {
    let applied = many_worlds
        .style()
        .set_property("display", layout.many_worlds.as_css())
        .and_then(|()| {
            copenhagen
                .style()
                .set_property("display", layout.copenhagen.as_css())
        });
    if let Err(err) = applied {
        tracing::warn!(error = %js_error(err), "toggle: display update failed");
    }
}

// ============================================================================
// Initializers
// ============================================================================

/// Widget initializers backed by the live document.
pub struct DomInitializers {
    window: Window,
    document: Document,
    config: DoorsConfig,
}

impl DomInitializers {
    pub fn new(window: Window, document: Document, config: DoorsConfig) -> Self {
        Self {
            window,
            document,
            config,
        }
    }
}

impl WidgetInitializers for DomInitializers {
    type Mounted = MountedWidget;

    fn garden(&mut self) -> Result<MountedWidget> {
        let canvas: HtmlCanvasElement = element_by_id(&self.document, "garden", GARDEN_CANVAS)?;
        let growth: HtmlInputElement = element_by_id(&self.document, "garden", GARDEN_GROWTH)?;
        let cfg = self.config.garden.clone();

        let mut surface = CanvasSurface::new(canvas, "garden")?;
        let size = surface.fit(&self.window, cfg.min_height, cfg.height_ratio);
        let frames = RafScheduler::new(self.window.clone());
        let state = Rc::new(RefCell::new(GardenLoop {
            garden: ParticleGarden::new(cfg.clone(), size, MathRandom),
            surface,
            growth,
            run: RunLoop::new(),
            frames: frames.clone(),
        }));

        let weak = Rc::downgrade(&state);
        frames.set_callback(move |_ts| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().tick();
            }
        });

        let resize = {
            let state = Rc::downgrade(&state);
            let window = self.window.clone();
            Listener::new(&self.window, "resize", move |_| {
                if let Some(state) = state.upgrade() {
                    let mut s = state.borrow_mut();
                    let size = s.surface.fit(&window, cfg.min_height, cfg.height_ratio);
                    s.garden.resize(size);
                }
            })?
        };

        {
            let s = &mut *state.borrow_mut();
            s.render();
            s.run.start(&mut s.frames);
        }

        Ok(MountedWidget::new("garden", vec![resize]).on_drop(move || state.borrow_mut().stop()))
    }

    fn dissolve(&mut self) -> Result<MountedWidget> {
        let canvas: HtmlCanvasElement =
            element_by_id(&self.document, "dissolve", DISSOLVE_CANVAS)?;
        let entropy: HtmlInputElement =
            element_by_id(&self.document, "dissolve", DISSOLVE_ENTROPY)?;
        let cfg = self.config.dissolve.clone();

        let mut surface = CanvasSurface::new(canvas, "dissolve")?;
        let size = surface.fit(&self.window, cfg.min_height, cfg.height_ratio);
        let state = Rc::new(RefCell::new(DissolveView {
            widget: DissolveWidget::new(cfg.clone(), size, MathRandom),
            surface,
        }));
        state.borrow_mut().draw(0);

        let input = {
            let state = Rc::clone(&state);
            let entropy_el = entropy.clone();
            Listener::new(&entropy, "input", move |_| {
                state.borrow_mut().draw(parse_level(&entropy_el.value()));
            })?
        };
        let resize = {
            let window = self.window.clone();
            Listener::new(&self.window, "resize", move |_| {
                let s = &mut *state.borrow_mut();
                let size = s.surface.fit(&window, cfg.min_height, cfg.height_ratio);
                s.widget.resize(size);
                if let Err(err) = s.widget.redraw(&mut s.surface) {
                    tracing::warn!(%err, "dissolve: redraw failed");
                }
            })?
        };

        Ok(MountedWidget::new("dissolve", vec![input, resize]))
    }

    fn observer(&mut self) -> Result<MountedWidget> {
        let text: Element = element_by_id(&self.document, "observer", OBSERVER_STATE)?;
        let button: Element = element_by_id(&self.document, "observer", OBSERVER_BUTTON)?;

        let mut state = BinaryState::new(MathRandom);
        text.set_text_content(Some(state.text()));

        let click = Listener::new(&button, "click", move |_| {
            let outcome = state.observe();
            text.set_text_content(Some(outcome.text()));
        })?;

        Ok(MountedWidget::new("observer", vec![click]))
    }

    fn cone(&mut self) -> Result<MountedWidget> {
        let svg: Element = element_by_id(&self.document, "cone", CONE_SURFACE)?;
        let play: Element = element_by_id(&self.document, "cone", CONE_PLAY)?;
        let pause: Element = element_by_id(&self.document, "cone", CONE_PAUSE)?;
        let marker = svg
            .query_selector(CONE_MARKER)
            .map_err(js_error)?
            .ok_or(DoorsError::MissingElement {
                widget: "cone",
                element: CONE_MARKER,
            })?;

        let frames = RafScheduler::new(self.window.clone());
        let state = Rc::new(RefCell::new(ConeLoop {
            cone: ConeAnimation::new(self.config.cone.clone()),
            frames: frames.clone(),
            marker,
        }));

        let weak = Rc::downgrade(&state);
        frames.set_callback(move |_ts| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().tick();
            }
        });

        let on_play = {
            let state = Rc::clone(&state);
            Listener::new(&play, "click", move |_| {
                let s = &mut *state.borrow_mut();
                s.cone.play(&mut s.frames);
            })?
        };
        let on_pause = {
            let state = Rc::clone(&state);
            Listener::new(&pause, "click", move |_| {
                let s = &mut *state.borrow_mut();
                s.cone.pause(&mut s.frames);
            })?
        };

        Ok(MountedWidget::new("cone", vec![on_play, on_pause])
            .on_drop(move || state.borrow_mut().stop()))
    }

    fn toggle(&mut self) -> Result<MountedWidget> {
        let checkbox: HtmlInputElement =
            element_by_id(&self.document, "toggle", TOGGLE_CHECKBOX)?;
        let many_worlds: HtmlElement =
            element_by_id(&self.document, "toggle", TOGGLE_MANY_WORLDS)?;
        let copenhagen: HtmlElement =
            element_by_id(&self.document, "toggle", TOGGLE_COPENHAGEN)?;

        let mut toggle = DisplayToggle::new(checkbox.checked());
        apply_layout(&many_worlds, &copenhagen, toggle.layout());

        let input = {
            let checkbox_el = checkbox.clone();
            Listener::new(&checkbox, "input", move |_| {
                let layout = toggle.set_checked(checkbox_el.checked());
                apply_layout(&many_worlds, &copenhagen, layout);
            })?
        };

        Ok(MountedWidget::new("toggle", vec![input]))
    }
}
