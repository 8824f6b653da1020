//! Browser host: DOM touch events on an `EventTarget`, `window.setTimeout` timers.

use js_sys::Promise;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Element, EventTarget, Node, TouchEvent, Window};

use crate::refresh::{Completion, Handler, Host};
use crate::state::{ScrollNode, TouchInput, TouchKind};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("could not register `{event}` listener: {message}")]
    Listen { event: &'static str, message: String },
    #[error("could not schedule timer: {0}")]
    Timer(String),
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl ScrollNode for Element {
    fn scroll_top(&self) -> f64 {
        Element::scroll_top(self) as f64
    }

    fn parent(&self) -> Option<Self> {
        self.parent_element()
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &Node = other.as_ref();
        Node::contains(self, Some(other))
    }
}

impl TouchInput for TouchEvent {
    type Node = Element;

    fn first_point(&self) -> Option<(f64, f64)> {
        self.touches()
            .item(0)
            .map(|t| (t.screen_x() as f64, t.screen_y() as f64))
    }

    fn target(&self) -> Option<Element> {
        web_sys::Event::target(self)?.dyn_into::<Element>().ok()
    }

    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }
}

/// Listens on `target` (usually the window) and schedules timers on `window`.
pub struct WebHost {
    window: Window,
    target: EventTarget,
}

pub struct WebListener {
    kind: TouchKind,
    closure: Closure<dyn FnMut(TouchEvent)>,
}

impl WebHost {
    pub fn new(window: Window, target: EventTarget) -> Self {
        Self { window, target }
    }

    pub fn for_window() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let target: EventTarget = window.clone().into();
        Ok(Self::new(window, target))
    }
}

impl Host for WebHost {
    type Node = Element;
    type Listener = WebListener;
    type Timer = i32;
    type Error = HostError;

    fn listen(&self, kind: TouchKind, handler: Handler<Element>) -> Result<WebListener, HostError> {
        let closure = Closure::wrap(Box::new(move |e: TouchEvent| {
            let event: &dyn TouchInput<Node = Element> = &e;
            handler(event)
        }) as Box<dyn FnMut(TouchEvent)>);
        let options = AddEventListenerOptions::new();
        // move listeners have to be able to call preventDefault
        options.set_passive(!kind.needs_active_listener());
        self.target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.event_name(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| HostError::Listen {
                event: kind.event_name(),
                message: describe(&err),
            })?;
        Ok(WebListener { kind, closure })
    }

    fn unlisten(&self, listener: WebListener) {
        let _ = self.target.remove_event_listener_with_callback(
            listener.kind.event_name(),
            listener.closure.as_ref().unchecked_ref(),
        );
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<i32, HostError> {
        let callback = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            )
            .map_err(|err| HostError::Timer(describe(&err)))
    }

    fn clear_timeout(&self, timer: i32) {
        self.window.clear_timeout_with_handle(timer);
    }
}

/// Adapt a promise-returning operation into a refresh operation.
/// Resolution and rejection both settle the gesture.
pub fn promise_refresh(op: impl Fn() -> Promise + 'static) -> impl Fn(Completion) + 'static {
    move |completion: Completion| {
        let promise = op();
        let mut slot = Some(completion);
        let settle = Closure::wrap(Box::new(move |_outcome: JsValue| {
            if let Some(completion) = slot.take() {
                completion.finish();
            }
        }) as Box<dyn FnMut(JsValue)>);
        let _ = promise.then2(&settle, &settle);
        // runs at most once more, from the promise job queue
        settle.forget();
    }
}
