use std::{cell::RefCell, rc::Rc};

use shared::{ConfigError, FieldConfig, ParticleField, Renderer};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::{
    callbacks::{on_mouse_move, on_resize, sync_canvas_size, SharedRenderer},
    clock::{AnimationFrames, FrameCallback},
    document,
    draw::CanvasSurface,
    window,
};

const DEFAULT_INTERACTION_ID: &str = "interaction-layer";
const CONFIG_ATTRIBUTE: &str = "starfield";

fn config_error(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn remove_listener(target: &EventTarget, kind: &str, listener: &JsValue) {
    if let Err(err) = target.remove_event_listener_with_callback(kind, listener.unchecked_ref()) {
        log::warn!("failed to remove `{kind}` listener: {err:?}");
    }
}

/// A mounted starfield: the canvas, its listeners and the running frame loop.
#[wasm_bindgen]
pub struct StarfieldHook {
    renderer: SharedRenderer,
    frame_callback: FrameCallback,
    canvas: HtmlCanvasElement,
    interaction: HtmlElement,
    resize_listener: Option<Closure<dyn FnMut(JsValue)>>,
    mouse_move_listener: Option<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl StarfieldHook {
    /// Mounts into `container` and spawns pointer particles from moves over `interaction`.
    ///
    /// `options` may be `undefined` or a partial config object in camelCase.
    pub fn attach(
        container: &HtmlElement,
        interaction: &HtmlElement,
        options: JsValue,
    ) -> Result<StarfieldHook, JsValue> {
        let config: Option<FieldConfig> = serde_wasm_bindgen::from_value(options)?;

        StarfieldHook::attach_with(container, interaction, config.unwrap_or_default())
    }

    /// Looks both elements up by id. Options come from the container's `data-starfield` JSON.
    pub fn mount(
        container_id: &str,
        interaction_id: Option<String>,
    ) -> Result<StarfieldHook, JsValue> {
        let interaction_id = interaction_id.unwrap_or_else(|| DEFAULT_INTERACTION_ID.to_string());

        let find = |id: &str| -> Result<HtmlElement, JsValue> {
            document()
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("no element with id `{id}`")))?
                .dyn_into::<HtmlElement>()
                .map_err(JsValue::from)
        };

        let container = find(container_id)?;
        let interaction = find(&interaction_id)?;

        let config = match container.dataset().get(CONFIG_ATTRIBUTE) {
            Some(json) => serde_json::from_str::<FieldConfig>(&json).map_err(|err| {
                JsValue::from_str(&format!("invalid data-{CONFIG_ATTRIBUTE}: {err}"))
            })?,
            None => FieldConfig::default(),
        };

        StarfieldHook::attach_with(&container, &interaction, config)
    }

    /// Removes both listeners and stops the frame loop. Further calls do nothing.
    pub fn detach(&mut self) {
        if let Some(listener) = self.resize_listener.take() {
            remove_listener(&window(), "resize", listener.as_ref());
        }

        if let Some(listener) = self.mouse_move_listener.take() {
            remove_listener(&self.interaction, "mousemove", listener.as_ref());
        }

        let detached = self.renderer.borrow_mut().detach();

        // The frame callback holds the renderer, which holds the callback through its clock.
        self.frame_callback.borrow_mut().take();

        if detached {
            log::info!("starfield detached");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn particles(&self) -> usize {
        self.renderer.borrow().field().len()
    }

    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }
}

impl StarfieldHook {
    fn attach_with(
        container: &HtmlElement,
        interaction: &HtmlElement,
        config: FieldConfig,
    ) -> Result<StarfieldHook, JsValue> {
        let canvas = document()
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;

        let style = canvas.style();
        style.set_property("position", "absolute")?;
        style.set_property("top", "0")?;
        style.set_property("left", "0")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("background", &config.background)?;

        container.append_child(&canvas)?;

        let (width, height) = sync_canvas_size(&canvas);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut surface = CanvasSurface::new(context);

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let field = ParticleField::new(config, width, height, seed).map_err(|err| {
            canvas.remove();
            config_error(err)
        })?;

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let clock = AnimationFrames::new(window(), frame_callback.clone());
        let renderer: SharedRenderer = Rc::new(RefCell::new(Renderer::new(field, clock)));

        {
            let renderer = renderer.clone();
            let mut surface = surface.clone();

            *frame_callback.borrow_mut() = Some(Closure::new(move || {
                let mut renderer = renderer.borrow_mut();

                if let Some(handle) = renderer.pending() {
                    if let Err(err) = renderer.frame(handle, &mut surface) {
                        log::error!("starfield frame failed: {err:?}");
                    }
                }
            }));
        }

        // Dropping `hook` on any early return below unregisters whatever was registered so far.
        let mut hook = StarfieldHook {
            renderer: renderer.clone(),
            frame_callback,
            canvas: canvas.clone(),
            interaction: interaction.clone(),
            resize_listener: None,
            mouse_move_listener: None,
        };

        {
            let canvas = canvas.clone();
            let renderer = renderer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_: JsValue| {
                on_resize(&canvas, &renderer);
            });
            window().add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            hook.resize_listener = Some(closure);
        }

        {
            let canvas = canvas.clone();
            let renderer = renderer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                on_mouse_move(&canvas, &renderer, event);
            });
            interaction
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            hook.mouse_move_listener = Some(closure);
        }

        renderer
            .borrow_mut()
            .start(&mut surface)
            .map_err(|err| JsValue::from_str(&format!("starfield failed to start: {err:?}")))?;

        log::info!("starfield attached at {width}x{height}");

        Ok(hook)
    }
}

impl Drop for StarfieldHook {
    fn drop(&mut self) {
        self.detach();
    }
}
