//! Browser host for pageguard.
//!
//! On wasm32 this crate exports:
//!
//! - `start`: runs at module load and wires the page once the DOM is ready
//! - `install_with_settings(json)`: replaces the default settings, valid
//!   until the page has been wired
//! - `edit_lock_held()`: whether an edit window is currently open
//!
//! Each registered listener becomes one `Closure` that runs its guard through
//! [`PageController::handle`] and then calls `preventDefault` or
//! `stopImmediatePropagation` on the event as the outcome asks.
//!
//! Warnings raised by the browser host go to the developer console through
//! the [`console`] subscriber installed by `start`.
//!
//! [`PageController::handle`]: pageguard_core::PageController::handle

pub mod console;

use pageguard_model::{GuardSettings, Result};

/// Parse settings handed over from JavaScript. Blank input means defaults.
pub fn settings_from_json(json: &str) -> Result<GuardSettings> {
    if json.trim().is_empty() {
        return Ok(GuardSettings::default());
    }
    GuardSettings::from_json_str(json)
}

/// Install lifecycle: settings may change until the page is wired, once.
#[derive(Debug, Default)]
pub struct Installer {
    pending: Option<GuardSettings>,
    wired: bool,
}

impl Installer {
    /// Use `settings` when the page gets wired. Returns false once wired.
    pub fn configure(&mut self, settings: GuardSettings) -> bool {
        if self.wired {
            return false;
        }
        self.pending = Some(settings);
        true
    }

    /// Settings to wire with, or `None` when the page is already wired.
    pub fn begin_wiring(&mut self) -> Option<GuardSettings> {
        if self.wired {
            return None;
        }
        self.wired = true;
        Some(self.pending.take().unwrap_or_default())
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement,
        HtmlTextAreaElement, Window,
    };

    use pageguard_core::{Handler, PageController};
    use pageguard_model::{GuardSettings, PageHost, Selector};

    use crate::console::{ConsoleLevel, init_console_logging};
    use crate::{Installer, settings_from_json};

    thread_local! {
        static INSTALLER: RefCell<Installer> = RefCell::new(Installer::default());
        static PAGE: RefCell<Option<Rc<RefCell<WiredPage>>>> = const { RefCell::new(None) };
        static READY_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static GUARD_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = RefCell::new(Vec::new());
    }

    /// [`PageHost`] over the live document.
    struct WebHost {
        window: Window,
        document: Document,
    }

    impl WebHost {
        fn current() -> Option<Self> {
            let window = web_sys::window()?;
            let document = window.document()?;
            Some(Self { window, document })
        }
    }

    fn collect(list: Result<web_sys::NodeList, JsValue>, css: &str) -> Vec<Element> {
        let list = match list {
            Ok(list) => list,
            Err(error) => {
                tracing::warn!(selector = css, ?error, "selector query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    impl PageHost for WebHost {
        type Element = Element;

        fn query_all(&self, selector: &Selector) -> Vec<Element> {
            let css = selector.to_css();
            collect(self.document.query_selector_all(&css), &css)
        }

        fn query_within(&self, scope: &Element, selector: &Selector) -> Vec<Element> {
            let css = selector.to_css();
            collect(scope.query_selector_all(&css), &css)
        }

        fn attribute(&self, element: &Element, name: &str) -> Option<String> {
            element.get_attribute(name)
        }

        fn has_attribute(&self, element: &Element, name: &str) -> bool {
            element.has_attribute(name)
        }

        fn value(&self, element: &Element) -> String {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.value()
            } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
                area.value()
            } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                select.value()
            } else {
                element.get_attribute("value").unwrap_or_default()
            }
        }

        fn text_content(&self, element: &Element) -> String {
            element.text_content().unwrap_or_default()
        }

        fn previous_sibling_text(&self, element: &Element) -> Option<String> {
            element
                .previous_element_sibling()
                .map(|sibling| sibling.text_content().unwrap_or_default())
        }

        fn set_border_color(&mut self, element: &Element, color: &str) {
            let Some(styled) = element.dyn_ref::<HtmlElement>() else {
                return;
            };
            if let Err(error) = styled.style().set_property("border-color", color) {
                tracing::warn!(?error, "could not set border color");
            }
        }

        fn alert(&mut self, message: &str) {
            if let Err(error) = self.window.alert_with_message(message) {
                tracing::warn!(?error, "alert failed");
            }
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.window
                .confirm_with_message(message)
                .unwrap_or_else(|error| {
                    tracing::warn!(?error, "confirm failed, treating as declined");
                    false
                })
        }
    }

    struct WiredPage {
        host: WebHost,
        controller: PageController<Element>,
    }

    /// Wire the page on `DOMContentLoaded`, or on the next task when the
    /// document is already parsed, so `install_with_settings` can run first.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        init_console_logging(write_console);
        let Some(host) = WebHost::current() else {
            tracing::warn!("no document, page guards not installed");
            return;
        };

        let on_ready =
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| wire_page());
        let scheduled = if host.document.ready_state() == "loading" {
            host.document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            )
        } else {
            host.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    on_ready.as_ref().unchecked_ref(),
                    0,
                )
                .map(|_handle| ())
        };
        if let Err(error) = scheduled {
            tracing::warn!(?error, "could not schedule page wiring");
            return;
        }
        READY_HANDLER.with(|slot| *slot.borrow_mut() = Some(on_ready));
    }

    fn write_console(level: ConsoleLevel, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            ConsoleLevel::Error => web_sys::console::error_1(&line),
            ConsoleLevel::Warn => web_sys::console::warn_1(&line),
            ConsoleLevel::Log => web_sys::console::log_1(&line),
        }
    }

    /// Replace the settings used to wire the page. Fails once it is wired.
    #[wasm_bindgen]
    pub fn install_with_settings(json: String) -> Result<(), JsValue> {
        let settings =
            settings_from_json(&json).map_err(|error| JsValue::from_str(&error.to_string()))?;
        if INSTALLER.with(|installer| installer.borrow_mut().configure(settings)) {
            Ok(())
        } else {
            Err(JsValue::from_str("page guards are already wired"))
        }
    }

    #[wasm_bindgen]
    pub fn edit_lock_held() -> bool {
        PAGE.with(|slot| {
            slot.borrow().as_ref().is_some_and(|page| {
                page.try_borrow()
                    .is_ok_and(|page| page.controller.is_edit_lock_held())
            })
        })
    }

    fn wire_page() {
        let Some(settings) = INSTALLER.with(|installer| installer.borrow_mut().begin_wiring())
        else {
            return;
        };
        if let Err(error) = install(settings) {
            tracing::warn!(?error, "page guards not installed");
        }
    }

    fn install(settings: GuardSettings) -> Result<(), JsValue> {
        let host = WebHost::current().ok_or_else(|| JsValue::from_str("no document"))?;
        let controller = PageController::wire(&host, settings);
        let listeners = controller.listeners().to_vec();
        let page = Rc::new(RefCell::new(WiredPage { host, controller }));

        for listener in listeners {
            let callback =
                guard_callback(Rc::clone(&page), listener.handler, listener.target.clone());
            listener.target.add_event_listener_with_callback(
                listener.handler.event().as_str(),
                callback.as_ref().unchecked_ref(),
            )?;
            GUARD_HANDLERS.with(|handlers| handlers.borrow_mut().push(callback));
        }

        PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        Ok(())
    }

    fn guard_callback(
        page: Rc<RefCell<WiredPage>>,
        handler: Handler,
        target: Element,
    ) -> Closure<dyn FnMut(web_sys::Event)> {
        Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Ok(mut page) = page.try_borrow_mut() else {
                tracing::warn!(handler = handler.label(), "guard re-entered, event ignored");
                return;
            };
            let WiredPage { host, controller } = &mut *page;
            let outcome = controller.handle(host, handler, &target);
            if outcome.prevents_default() {
                event.prevent_default();
            }
            if outcome.stops_propagation() {
                event.stop_immediate_propagation();
            }
        })
    }
}
