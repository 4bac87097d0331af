// DOM side of the background: canvas sizing, event listeners and the
// requestAnimationFrame loop. Every resource is held by a guard that releases
// it on drop, so an early `?` during setup leaves nothing behind.

use crate::config::BackgroundConfig;
use crate::scene::{Scene, SharedScene};
use crate::utils::Timer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window,
};

const LAYER_STYLE: [(&str, &str); 6] = [
    ("position", "fixed"),
    ("inset", "0"),
    ("pointer-events", "none"),
    ("z-index", "0"),
    ("background", "transparent"),
    ("display", "block"),
];

/// An attached event listener, removed again when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Listener, JsValue> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling animation frame loop. The callback holds a reference
/// to itself, so drop must take it out to break the cycle.
struct FrameLoop {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    fn start(
        window: &Window,
        scene: SharedScene,
        mut ctx: CanvasRenderingContext2d,
    ) -> Result<FrameLoop, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let next = callback.clone();
        let next_handle = handle.clone();
        let next_window = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            next_handle.set(None);
            match scene.tick(&mut ctx) {
                Ok(true) => {}
                Ok(false) => return,
                Err(err) => {
                    console::warn_2(
                        &"particle background: frame failed, deactivated".into(),
                        &err,
                    );
                    return;
                }
            }
            if let Some(cb) = next.borrow().as_ref() {
                match next_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => next_handle.set(Some(id)),
                    Err(err) => console::warn_2(
                        &"particle background: could not schedule frame".into(),
                        &err,
                    ),
                }
            }
        }) as Box<dyn FnMut()>));

        let frame_loop = FrameLoop {
            window: window.clone(),
            handle,
            callback,
        };
        let first = frame_loop
            .callback
            .borrow()
            .as_ref()
            .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
        match first {
            Some(id) => frame_loop.handle.set(Some(id?)),
            None => return Err("frame callback missing".into()),
        }
        Ok(frame_loop)
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

/// Everything owned by one activation. Dropping it tears the background
/// down: the scene goes inert first, then the frame is cancelled and the
/// listeners are detached.
pub(crate) struct Mounted {
    scene: SharedScene,
    _frame: FrameLoop,
    _listeners: Vec<Listener>,
}

impl Mounted {
    pub(crate) fn setup(
        canvas: &HtmlCanvasElement,
        config: BackgroundConfig,
    ) -> Result<Mounted, JsValue> {
        config.validate().map_err(|msg| JsValue::from_str(&msg))?;

        let window = web_sys::window().ok_or("no global window")?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        apply_layer_style(canvas)?;

        let scene = SharedScene::new(Scene::new(config, StdRng::from_entropy()));
        fit_to_viewport(&window, canvas, &scene)?;

        let mut listeners = Vec::with_capacity(2);
        listeners.push(Listener::attach(
            window.as_ref(),
            "resize",
            resize_callback(window.clone(), canvas.clone(), scene.clone()),
        )?);
        if config.interactive {
            // The layer ignores pointer events, so track the pointer on the
            // window and map it into canvas space.
            listeners.push(Listener::attach(
                window.as_ref(),
                "mousemove",
                pointer_callback(canvas.clone(), scene.clone()),
            )?);
        }

        let frame = FrameLoop::start(&window, scene.clone(), ctx)?;
        console::log_1(
            &format!(
                "particle background mounted: {}x{}, {} particles",
                canvas.width(),
                canvas.height(),
                scene.particle_count()
            )
            .into(),
        );

        Ok(Mounted {
            scene,
            _frame: frame,
            _listeners: listeners,
        })
    }

    pub(crate) fn scene(&self) -> &SharedScene {
        &self.scene
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.scene.deactivate();
    }
}

fn apply_layer_style(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let style = canvas.style();
    for (property, value) in LAYER_STYLE.iter() {
        style.set_property(property, value)?;
    }
    Ok(())
}

fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("viewport width is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("viewport height is not a number")?;
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

fn fit_to_viewport(
    window: &Window,
    canvas: &HtmlCanvasElement,
    scene: &SharedScene,
) -> Result<(), JsValue> {
    if !scene.is_active() {
        return Ok(());
    }
    let (width, height) = viewport_size(window)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let _timer = Timer::new("ParticleField::populate");
    scene.resize(width as f64, height as f64);
    Ok(())
}

fn resize_callback(
    window: Window,
    canvas: HtmlCanvasElement,
    scene: SharedScene,
) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |_event: Event| {
        if let Err(err) = fit_to_viewport(&window, &canvas, &scene) {
            console::warn_2(&"particle background: resize failed".into(), &err);
        }
    }) as Box<dyn FnMut(Event)>)
}

fn pointer_callback(canvas: HtmlCanvasElement, scene: SharedScene) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            let rect = canvas.get_bounding_client_rect();
            scene.pointer_moved(
                event.client_x() as f64 - rect.left(),
                event.client_y() as f64 - rect.top(),
            );
        }
    }) as Box<dyn FnMut(Event)>)
}
