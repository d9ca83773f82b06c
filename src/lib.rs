mod utils;

pub mod animation;
pub mod color;
pub mod config;
pub mod field;
pub mod particle;
pub mod renderer;
pub mod surface;

pub use animation::Animation;
pub use color::Color;
pub use config::FieldConfig;
pub use field::{Link, ParticleField};
pub use particle::Particle;

use renderer::{CanvasRenderer, ParentViewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Event, HtmlCanvasElement, Window};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

type CanvasAnimation = Animation<CanvasRenderer, ParentViewport>;

// Browser hooks keeping one animation alive: the pending frame request, the
// self-scheduling frame callback and the window resize listener
struct Hooks {
    window: Window,
    pending_frame: Cell<Option<i32>>,
    frame_callback: RefCell<Option<Closure<dyn FnMut()>>>,
    resize_callback: RefCell<Option<Closure<dyn FnMut(Event)>>>,
}

impl Hooks {
    fn request_frame(&self) -> Result<(), JsValue> {
        if let Some(callback) = self.frame_callback.borrow().as_ref() {
            let handle = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref::<Function>())?;
            self.pending_frame.set(Some(handle));
        }
        Ok(())
    }

    // Cancels the pending frame, detaches the resize listener and drops the
    // frame callback, which also breaks its reference back to the hooks
    fn teardown(&self) -> Result<(), JsValue> {
        if let Some(handle) = self.pending_frame.take() {
            self.window.cancel_animation_frame(handle)?;
        }
        if let Some(callback) = self.resize_callback.borrow_mut().take() {
            self.window.remove_event_listener_with_callback(
                "resize",
                callback.as_ref().unchecked_ref::<Function>(),
            )?;
        }
        self.frame_callback.borrow_mut().take();
        Ok(())
    }
}

// Handle to a running particle network. The animation keeps running when the
// handle is freed; call `stop` to tear it down.
#[wasm_bindgen]
pub struct NetworkParticles {
    animation: Rc<RefCell<CanvasAnimation>>,
    hooks: Rc<Hooks>,
}

#[wasm_bindgen]
impl NetworkParticles {
    // Starts the default network on the canvas with the given id. Returns
    // undefined when there is no such canvas or it has no 2d context.
    pub fn start(canvas_id: &str) -> Result<Option<NetworkParticles>, JsValue> {
        NetworkParticles::start_with_config(canvas_id, FieldConfig::default())
    }

    #[wasm_bindgen(js_name = startWithCount)]
    pub fn start_with_count(
        canvas_id: &str,
        count: u32,
    ) -> Result<Option<NetworkParticles>, JsValue> {
        let config = FieldConfig::default().with_particle_count(count as usize);
        NetworkParticles::start_with_config(canvas_id, config)
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.animation.borrow().field().particles().len() as u32
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        !self.animation.borrow().is_stopped()
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.animation.borrow().frames() as f64
    }

    pub fn stop(&mut self) -> Result<(), JsValue> {
        self.animation.borrow_mut().stop();
        self.hooks.teardown()?;
        console::log_1(&"network particles stopped".into());
        Ok(())
    }
}

impl NetworkParticles {
    pub fn start_with_config(
        canvas_id: &str,
        config: FieldConfig,
    ) -> Result<Option<NetworkParticles>, JsValue> {
        let window = match web_sys::window() {
            Some(window) => window,
            None => return Ok(None),
        };
        let canvas = match window.document().and_then(|d| d.get_element_by_id(canvas_id)) {
            Some(element) => match element.dyn_into::<HtmlCanvasElement>() {
                Ok(canvas) => canvas,
                Err(_) => return Ok(None),
            },
            None => return Ok(None),
        };
        let renderer = match CanvasRenderer::new(canvas.clone())? {
            Some(renderer) => renderer,
            None => return Ok(None),
        };
        let viewport = ParentViewport { canvas };

        let mut rng = rand::thread_rng();
        let animation = Rc::new(RefCell::new(Animation::new(renderer, viewport, config, &mut rng)));

        // First frame is drawn right away, the rest on animation frames
        animation.borrow_mut().tick()?;

        let hooks = Rc::new(Hooks {
            window,
            pending_frame: Cell::new(None),
            frame_callback: RefCell::new(None),
            resize_callback: RefCell::new(None),
        });

        let resize_target = animation.clone();
        let resize_callback = Closure::wrap(Box::new(move |_event: Event| {
            resize_target.borrow_mut().handle_resize();
        }) as Box<dyn FnMut(Event)>);
        hooks.window.add_event_listener_with_callback(
            "resize",
            resize_callback.as_ref().unchecked_ref::<Function>(),
        )?;
        *hooks.resize_callback.borrow_mut() = Some(resize_callback);

        let frame_animation = animation.clone();
        let frame_hooks = hooks.clone();
        let frame_callback = Closure::wrap(Box::new(move || {
            frame_hooks.pending_frame.set(None);
            let drawn = {
                let mut animation = frame_animation.borrow_mut();
                if animation.is_stopped() {
                    return;
                }
                #[cfg(feature = "frame-timing")]
                let _timer = Timer::new("NetworkParticles::tick");
                animation.tick()
            };
            let scheduled = match drawn {
                Ok(()) => frame_hooks.request_frame(),
                Err(err) => {
                    console::error_2(&"network particles: frame failed".into(), &err);
                    frame_hooks.teardown()
                }
            };
            if let Err(err) = scheduled {
                console::error_2(&"network particles: browser hook failed".into(), &err);
            }
        }) as Box<dyn FnMut()>);
        *hooks.frame_callback.borrow_mut() = Some(frame_callback);

        if let Err(err) = hooks.request_frame() {
            hooks.teardown()?;
            return Err(err);
        }

        {
            let animation = animation.borrow();
            let field = animation.field();
            console::log_1(
                &format!(
                    "network particles: {} particles on {}x{}",
                    field.particles().len(),
                    field.width(),
                    field.height()
                )
                .into(),
            );
        }

        Ok(Some(NetworkParticles { animation, hooks }))
    }
}
