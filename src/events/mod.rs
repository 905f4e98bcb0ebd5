pub mod pointer;
pub mod window;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

pub use pointer::{wire_input_handlers, InputWiring};
pub use window::wire_resize;

/// Attach `handler` for `kind` on `target` for the lifetime of the page.
pub(crate) fn listen<E>(target: &web::EventTarget, kind: &str, passive: bool, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let result = if passive {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &opts,
        )
    } else {
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
    };
    if let Err(e) = result {
        log::error!("[events] failed to listen for {}: {:?}", kind, e);
    }
    closure.forget();
}
