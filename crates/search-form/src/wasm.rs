//! WASM bindings for the search form.
//!
//! `WebSearchForm` wraps a [`SearchForm`] wired to the browser's geolocation,
//! the Nominatim client and a JavaScript navigation callback. The host page
//! forwards DOM events to it and re-renders from [`WebSearchForm::render`].

use crate::slug;
use crate::{build_search_url, FormConfig, Markup, ModalClick, Navigator, Resolution, SearchForm, SearchState};
use branchen_geo::{BrowserGeolocator, Coordinate};
use branchen_geocoding::{ClientConfig, NominatimClient};
use js_sys::{Function, Promise};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Slug for a search term (`"alle"` when empty).
#[wasm_bindgen]
pub fn search_slug(text: &str) -> String {
    slug::search_slug(text)
}

/// Slug for a place name (`"deutschland"` when empty).
#[wasm_bindgen]
pub fn location_slug(text: &str) -> String {
    slug::location_slug(text)
}

/// Search URL for the given inputs without validation.
///
/// Coordinates are used only when both are given.
#[wasm_bindgen]
pub fn search_url(what: &str, where_text: &str, lat: Option<f64>, lon: Option<f64>) -> String {
    let state = SearchState {
        what: what.to_string(),
        where_text: where_text.to_string(),
        coordinates: lat.zip(lon).map(Coordinate::from),
        ..SearchState::default()
    };
    build_search_url(&state, FormConfig::default().radius_km)
}

/// Navigation through a JavaScript callback taking the URL.
struct JsNavigator(Function);

impl Navigator for JsNavigator {
    fn push(&self, url: &str) {
        if let Err(err) = self.0.call1(&JsValue::NULL, &JsValue::from_str(url)) {
            tracing::warn!(error = ?err, "Navigation callback threw");
        }
    }
}

type BrowserForm = SearchForm<BrowserGeolocator, NominatimClient, JsNavigator>;

/// A mounted search form for the browser.
#[wasm_bindgen]
pub struct WebSearchForm {
    form: Rc<BrowserForm>,
    markup: Rc<Markup>,
}

#[wasm_bindgen]
impl WebSearchForm {
    /// Mount a form; `navigate` is called with the search URL on submit.
    #[wasm_bindgen(constructor)]
    pub fn new(navigate: Function) -> Result<WebSearchForm, JsValue> {
        let geocoder = NominatimClient::with_config(ClientConfig::default()).map_err(to_js)?;
        let markup = Markup::new().map_err(to_js)?;
        let form = SearchForm::new(BrowserGeolocator::new(), geocoder, JsNavigator(navigate));
        Ok(Self {
            form: Rc::new(form),
            markup: Rc::new(markup),
        })
    }

    #[wasm_bindgen(js_name = setWhat)]
    pub fn set_what(&self, text: String) {
        self.form.set_what(text);
    }

    #[wasm_bindgen(js_name = setWhere)]
    pub fn set_where(&self, text: String) {
        self.form.set_where(text);
    }

    #[wasm_bindgen(js_name = focusWhere)]
    pub fn focus_where(&self) {
        self.form.focus_where();
    }

    /// Returns a promise that settles once the grace delay has passed and the
    /// suggestion list was (possibly) closed.
    #[wasm_bindgen(js_name = blurWhere)]
    pub fn blur_where(&self) -> Promise {
        let form = Rc::clone(&self.form);
        future_to_promise(async move {
            let closed = form.blur_where_after(sleep).await;
            Ok(JsValue::from_bool(closed))
        })
    }

    /// Resolves to `true` when the device location is now in use.
    #[wasm_bindgen(js_name = useMyLocation)]
    pub fn use_my_location(&self) -> Promise {
        let form = Rc::clone(&self.form);
        future_to_promise(async move {
            let resolution = form.select_device_location().await;
            Ok(JsValue::from_bool(matches!(resolution, Resolution::Located(_))))
        })
    }

    /// Returns the URL navigated to, or `undefined` when the submit was rejected.
    pub fn submit(&self) -> Option<String> {
        self.form.submit().ok()
    }

    /// `marker` is the `data-dismiss` attribute of the clicked element.
    #[wasm_bindgen(js_name = clickModal)]
    pub fn click_modal(&self, marker: &str) -> bool {
        self.form.click_modal(ModalClick::from_marker(marker))
    }

    pub fn render(&self) -> Result<String, JsValue> {
        self.form.render(&self.markup).map_err(to_js)
    }

    /// Current state serialized as a JSON string; parse it with `JSON.parse`.
    pub fn state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.form.state()).map_err(to_js)
    }

    pub fn unmount(&self) {
        self.form.unmount();
    }
}

/// `setTimeout` as a future.
async fn sleep(duration: std::time::Duration) {
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
        } else {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
