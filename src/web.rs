//! Web-specific DOM binding.
//!
//! Expects one element per [`LayerKind`], looked up by [`LayerKind::id`].
//! Layers without an element are skipped so a page can leave out the ones it
//! does not draw.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, HtmlElement};

use crate::scene::Scene;
use crate::Portfolio;

/// Longest the driver sleeps when nothing is scheduled, so intents issued
/// from event handlers show up within a frame.
const IDLE_POLL_MS: u64 = 16;

/// Errors raised by the DOM binding.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("no window available")]
    NoWindow,
    #[error("no document available")]
    NoDocument,
    #[error("no performance clock available")]
    NoPerformance,
    #[error("element #{0} is not an HtmlElement")]
    NotHtmlElement(&'static str),
    #[error("failed to set `{property}` on #{id}")]
    Style { id: &'static str, property: &'static str },
}

/// Milliseconds since page load, from `performance.now()`.
pub fn now_ms() -> Result<u64, WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let performance = window.performance().ok_or(WebError::NoPerformance)?;
    Ok(performance.now() as u64)
}

/// Apply every layer of `scene` to its element.
///
/// Unmounted layers get `display: none`; mounted ones get their transform,
/// opacity, blend mode and transition, plus text for text layers.
pub fn apply_scene(document: &Document, scene: &Scene) -> Result<(), WebError> {
    for layer in &scene.layers {
        let id = layer.kind.id();
        let Some(element) = document.get_element_by_id(id) else {
            trace!(id, "no element for layer");
            continue;
        };
        let element = element
            .dyn_into::<HtmlElement>()
            .map_err(|_| WebError::NotHtmlElement(id))?;
        let style = element.style();

        if !layer.mounted {
            set_style(&style, id, "display", "none")?;
            continue;
        }

        set_style(&style, id, "display", "")?;
        set_style(&style, id, "z-index", &layer.kind.z_index().to_string())?;
        set_style(&style, id, "transform", &layer.transform_css())?;
        set_style(&style, id, "opacity", &layer.opacity.to_string())?;
        set_style(&style, id, "mix-blend-mode", layer.blend.css())?;
        if let Some(transition) = &layer.transition {
            set_style(&style, id, "transition", &transition.css())?;
        }
        if let Some(text) = &layer.text {
            if element.text_content().as_deref() != Some(text.as_str()) {
                element.set_text_content(Some(text));
            }
        }
    }
    Ok(())
}

fn set_style(style: &CssStyleDeclaration, id: &'static str, property: &'static str, value: &str) -> Result<(), WebError> {
    style
        .set_property(property, value)
        .map_err(|_| WebError::Style { id, property })
}

/// Resolve after `ms` milliseconds via `setTimeout`.
pub async fn sleep_ms(ms: u64) {
    let timeout = ms.min(i32::MAX as u64) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout);
        } else {
            let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Drive `portfolio` from browser timers and keep the DOM in sync.
///
/// Event handlers share the same `Rc` and call intents with [`now_ms`].
/// Never returns unless the DOM binding fails.
///
/// ```rust,ignore
/// let page = Rc::new(RefCell::new(Portfolio::new()));
/// wasm_bindgen_futures::spawn_local(async move {
///     if let Err(err) = portfolio_core_view::web::run(page).await {
///         web_sys::console::error_1(&err.to_string().into());
///     }
/// });
/// ```
pub async fn run(portfolio: Rc<RefCell<Portfolio>>) -> Result<(), WebError> {
    let document = web_sys::window()
        .ok_or(WebError::NoWindow)?
        .document()
        .ok_or(WebError::NoDocument)?;

    loop {
        let now = now_ms()?;
        let (scene, deadline) = {
            let mut page = portfolio.borrow_mut();
            page.update(now);
            (page.scene(), page.next_deadline())
        };
        apply_scene(&document, &scene)?;

        let wait = deadline
            .map(|due| due.saturating_sub(now))
            .unwrap_or(IDLE_POLL_MS)
            .clamp(1, IDLE_POLL_MS);
        sleep_ms(wait).await;
    }
}
