//! Page tracking for the host HUD
//!
//! The host swaps the first class on its container element whenever the
//! player navigates, so "page changed" is observable as a class mutation on
//! that one element. Callbacks also fire once at registration so a script
//! loaded mid-session starts from the current page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Derive the page slug from the container's first class name.
///
/// `PagePreferences` becomes `preferences`. Only the first `Page` marker is
/// dropped.
pub fn page_slug(first_class: &str) -> String {
    first_class.replacen("Page", "", 1).to_lowercase()
}

/// Source of page-change notifications.
pub trait PageWatcher {
    /// Register `callback`: it fires once immediately, then again on every
    /// page change for the lifetime of the page.
    fn on_change(&self, callback: Box<dyn FnMut() + 'static>);
}

/// Hand-cranked watcher for tests and the native harness.
#[derive(Default)]
pub struct ManualWatcher {
    callbacks: std::cell::RefCell<Vec<Box<dyn FnMut() + 'static>>>,
}

impl ManualWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a class mutation on the watched element.
    pub fn trigger(&self) {
        for callback in self.callbacks.borrow_mut().iter_mut() {
            callback();
        }
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.borrow().len()
    }
}

impl PageWatcher for ManualWatcher {
    fn on_change(&self, mut callback: Box<dyn FnMut() + 'static>) {
        callback();
        self.callbacks.borrow_mut().push(callback);
    }
}

/// The HUD container element, if the page has one.
#[cfg(target_arch = "wasm32")]
fn container_element() -> Option<web_sys::Element> {
    web_sys::window()?
        .document()?
        .get_element_by_id(crate::consts::CONTAINER_ID)
}

/// Slug of the page currently shown, from the container's first class.
#[cfg(target_arch = "wasm32")]
pub fn current_page() -> Option<String> {
    let container = container_element()?;
    let first = container.class_list().item(0)?;
    Some(page_slug(&first))
}

/// Watcher backed by a `MutationObserver` on the HUD container's class
/// attribute. The initial fire happens even when the container is absent;
/// only the follow-up notifications need it.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct DomPageWatcher;

#[cfg(target_arch = "wasm32")]
impl DomPageWatcher {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl PageWatcher for DomPageWatcher {
    fn on_change(&self, mut callback: Box<dyn FnMut() + 'static>) {
        callback();

        let Some(container) = container_element() else {
            log::warn!("page container missing, page watching disabled");
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || callback());
        let Ok(observer) =
            web_sys::MutationObserver::new(closure.as_ref().unchecked_ref())
        else {
            return;
        };

        let init = web_sys::MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("class")));
        let _ = observer.observe_with_options(&container, &init);
        closure.forget();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_page_slug_strips_page_marker() {
        assert_eq!(page_slug("PagePreferences"), "preferences");
        assert_eq!(page_slug("PageCamp"), "camp");
    }

    #[test]
    fn test_page_slug_drops_only_first_marker() {
        assert_eq!(page_slug("PagePage"), "page");
    }

    #[test]
    fn test_page_slug_without_marker_just_lowercases() {
        assert_eq!(page_slug("TreasureMap"), "treasuremap");
    }

    #[test]
    fn test_registration_fires_once_immediately() {
        let watcher = ManualWatcher::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        watcher.on_change(Box::new(move || counter.set(counter.get() + 1)));
        assert_eq!(hits.get(), 1);
        assert_eq!(watcher.callback_count(), 1);
    }

    #[test]
    fn test_trigger_fires_every_registered_callback() {
        let watcher = ManualWatcher::new();
        let hits = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let counter = hits.clone();
            watcher.on_change(Box::new(move || counter.set(counter.get() + 1)));
        }
        assert_eq!(hits.get(), 2);

        watcher.trigger();
        assert_eq!(hits.get(), 4);
        watcher.trigger();
        assert_eq!(hits.get(), 6);
    }
}
