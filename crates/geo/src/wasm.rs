//! Browser geolocation through `navigator.geolocation`.
//!
//! The callback pair of `getCurrentPosition` is bridged into a `Promise` and
//! awaited with `JsFuture`, so callers see one async call.

use crate::{Coordinate, Geolocator, PositionError, PositionOptions};
use js_sys::{Function, Promise, Reflect};
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Geolocation, GeolocationPosition};

/// [`Geolocator`] backed by the browser's geolocation API.
#[derive(Debug, Clone)]
pub struct BrowserGeolocator {
    geolocation: Option<Geolocation>,
}

impl BrowserGeolocator {
    /// Looks up `window.navigator.geolocation`; absent outside a browser
    /// window or when the API is disabled.
    pub fn new() -> Self {
        let geolocation = web_sys::window().and_then(|window| window.navigator().geolocation().ok());
        Self { geolocation }
    }
}

impl Default for BrowserGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Geolocator for BrowserGeolocator {
    fn is_available(&self) -> bool {
        self.geolocation.is_some()
    }

    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinate, PositionError> {
        let Some(geolocation) = self.geolocation.as_ref() else {
            return Err(PositionError::PositionUnavailable);
        };

        let js_options = web_sys::PositionOptions::new();
        js_options.set_enable_high_accuracy(options.high_accuracy);
        js_options.set_timeout(millis(options.timeout));
        js_options.set_maximum_age(millis(options.maximum_age));

        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            if let Err(err) =
                geolocation.get_current_position_with_error_callback_and_options(&resolve, Some(&reject), &js_options)
            {
                // Synchronous failure: settle the promise so the await returns.
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });

        match JsFuture::from(promise).await {
            Ok(value) => {
                let position: GeolocationPosition = value.unchecked_into();
                let coords = position.coords();
                Ok(Coordinate::new(coords.latitude(), coords.longitude()))
            }
            Err(err) => Err(PositionError::from_code(error_code(&err))),
        }
    }
}

/// Reads `GeolocationPositionError.code`, 0 when missing.
fn error_code(err: &JsValue) -> u16 {
    Reflect::get(err, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64())
        .map_or(0, |code| code as u16)
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
