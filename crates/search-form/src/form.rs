//! The search form controller.
//!
//! [`SearchForm`] owns the state of one mounted form and reacts to the events
//! the host UI forwards to it. It is driven from a single thread: state lives
//! in `RefCell`/`Cell`, and no borrow is held across an `.await`.
//!
//! Location resolution is cancellable. Each call captures a generation number;
//! unmounting the form or starting another resolution bumps it, and a
//! resolution that resumes with a stale generation leaves the state alone.

use crate::config::FormConfig;
use crate::error::FormError;
use crate::markup::{Markup, MarkupError};
use crate::messages::USE_MY_LOCATION;
use crate::navigator::Navigator;
use crate::presenter::ModalClick;
use crate::state::{SearchState, UiState};
use crate::url;
use branchen_geo::{Coordinate, Geolocator};
use branchen_geocoding::{Place, ReverseGeocoder};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Identifies the suggestion list episode a blur belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurTicket {
    episode: u64,
}

/// Outcome of [`SearchForm::resolve_location`].
///
/// The form has already updated its own state by the time this is returned;
/// the value is for callers that want to react beyond the form.
#[derive(Debug)]
pub enum Resolution {
    /// Coordinates were stored and the sentinel text placed in "where"
    Located(Coordinate),
    /// The error modal now shows this error
    Failed(FormError),
    /// The form was unmounted or a newer resolution started; nothing changed
    Superseded,
}

/// One mounted "what/where" search form.
pub struct SearchForm<L, G, N> {
    locator: L,
    geocoder: G,
    navigator: N,
    config: FormConfig,
    state: RefCell<SearchState>,
    last_place: RefCell<Option<Place>>,
    generation: Cell<u64>,
    suggestion_episode: Cell<u64>,
    mounted: Cell<bool>,
}

impl<L, G, N> SearchForm<L, G, N>
where
    L: Geolocator,
    G: ReverseGeocoder,
    N: Navigator,
{
    /// Mount a form with default settings.
    pub fn new(locator: L, geocoder: G, navigator: N) -> Self {
        Self::with_config(locator, geocoder, navigator, FormConfig::default())
    }

    /// Mount a form with specific settings.
    pub fn with_config(locator: L, geocoder: G, navigator: N, config: FormConfig) -> Self {
        Self {
            locator,
            geocoder,
            navigator,
            config,
            state: RefCell::new(SearchState::new()),
            last_place: RefCell::new(None),
            generation: Cell::new(0),
            suggestion_episode: Cell::new(0),
            mounted: Cell::new(true),
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Place returned by the most recent successful reverse lookup.
    ///
    /// The "where" field keeps the sentinel text; hosts that want to show a
    /// human-readable location can read it from here.
    pub fn last_place(&self) -> Option<Place> {
        self.last_place.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    // -------------------------------------------------------------------------
    // Input events
    // -------------------------------------------------------------------------

    pub fn set_what(&self, text: impl Into<String>) {
        self.state.borrow_mut().what = text.into();
    }

    /// Ignored while locating, when the field is disabled.
    pub fn set_where(&self, text: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        if state.is_locating() {
            debug!("Ignoring location input while locating");
            return;
        }
        state.where_text = text.into();
    }

    /// Opens the "use my location" suggestion for an empty field when the
    /// platform can locate the device.
    pub fn focus_where(&self) {
        let mut state = self.state.borrow_mut();
        if state.ui == UiState::Idle && state.where_text.is_empty() && self.locator.is_available() {
            self.suggestion_episode.set(self.suggestion_episode.get() + 1);
            state.ui = UiState::SuggestionsOpen;
        }
    }

    /// Records a blur of the "where" field. The suggestion list stays open
    /// until the ticket is passed to [`close_suggestions`](Self::close_suggestions),
    /// which the host does after [`FormConfig::blur_grace`] so a click on the
    /// suggestion still lands.
    pub fn blur_where(&self) -> BlurTicket {
        BlurTicket {
            episode: self.suggestion_episode.get(),
        }
    }

    /// Closes the suggestion list if it is still the episode `ticket` was
    /// issued for. Returns whether it closed.
    pub fn close_suggestions(&self, ticket: BlurTicket) -> bool {
        let mut state = self.state.borrow_mut();
        if state.suggestions_visible() && ticket.episode == self.suggestion_episode.get() {
            state.ui = UiState::Idle;
            true
        } else {
            false
        }
    }

    /// [`blur_where`](Self::blur_where), wait out the grace delay with
    /// `sleep`, then [`close_suggestions`](Self::close_suggestions).
    ///
    /// `sleep` is the host runtime's timer, e.g. `tokio::time::sleep`.
    pub async fn blur_where_after<S, F>(&self, sleep: S) -> bool
    where
        S: FnOnce(Duration) -> F,
        F: Future<Output = ()>,
    {
        let ticket = self.blur_where();
        sleep(self.config.blur_grace).await;
        self.close_suggestions(ticket)
    }

    /// The user picked "use my location" from the suggestion list.
    pub async fn select_device_location(&self) -> Resolution {
        {
            let mut state = self.state.borrow_mut();
            if state.suggestions_visible() {
                state.ui = UiState::Idle;
            }
        }
        self.resolve_location().await
    }

    // -------------------------------------------------------------------------
    // Location resolution
    // -------------------------------------------------------------------------

    /// Acquire the device position, reverse-geocode it and remember it for
    /// the next submit.
    ///
    /// On success the coordinates are stored and "where" shows the sentinel
    /// text. Any failure opens the error modal; coordinates from an earlier
    /// resolution are kept. The form leaves the locating state however this
    /// future ends, including when it is dropped.
    pub async fn resolve_location(&self) -> Resolution {
        if !self.mounted.get() {
            return Resolution::Superseded;
        }
        if !self.locator.is_available() {
            return self.fail(FormError::GeolocationUnavailable);
        }

        let generation = self.begin_locating();
        let _locating = LocatingGuard {
            state: &self.state,
            current: &self.generation,
            generation,
        };

        let position = self.locator.current_position(&self.config.position).await;
        if self.is_stale(generation) {
            debug!(generation, "Position arrived after cancellation");
            return Resolution::Superseded;
        }

        let coordinate = match position {
            Ok(coordinate) => coordinate,
            Err(err) => {
                warn!(code = err.code(), error = %err, "Device position failed");
                return self.fail(err.into());
            }
        };
        debug!(%coordinate, "Device position acquired");

        let lookup = self.geocoder.reverse(coordinate).await;
        if self.is_stale(generation) {
            debug!(generation, "Reverse lookup finished after cancellation");
            return Resolution::Superseded;
        }

        match lookup {
            Ok(place) => {
                debug!(label = ?place.label(), resolved = place.is_resolved(), "Reverse lookup finished");
                {
                    let mut state = self.state.borrow_mut();
                    state.coordinates = Some(coordinate);
                    state.where_text = USE_MY_LOCATION.to_string();
                }
                *self.last_place.borrow_mut() = Some(place);
                Resolution::Located(coordinate)
            }
            Err(err) => {
                warn!(error = %err, "Reverse geocoding failed");
                self.fail(err.into())
            }
        }
    }

    /// Cancel pending work. Resolutions still in flight become no-ops.
    pub fn unmount(&self) {
        self.mounted.set(false);
        self.generation.set(self.generation.get() + 1);
    }

    fn begin_locating(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.state.borrow_mut().ui = UiState::Locating;
        generation
    }

    fn is_stale(&self, generation: u64) -> bool {
        !self.mounted.get() || self.generation.get() != generation
    }

    // -------------------------------------------------------------------------
    // Submit and error modal
    // -------------------------------------------------------------------------

    /// Validate, build the search URL and hand it to the navigator.
    ///
    /// Without a search term and without a device location the error modal
    /// opens instead and nothing is navigated to.
    pub fn submit(&self) -> Result<String, FormError> {
        let built = {
            let state = self.state.borrow();
            url::validate(&state).map(|()| url::build_search_url(&state, self.config.radius_km))
        };

        match built {
            Ok(url) => {
                info!(url = %url, "Navigating to search results");
                self.navigator.push(&url);
                Ok(url)
            }
            Err(err) => {
                debug!(error = %err, "Submit rejected");
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// A click inside the open error modal. Returns whether it closed.
    pub fn click_modal(&self, target: ModalClick) -> bool {
        if target.dismisses() {
            self.dismiss_error()
        } else {
            false
        }
    }

    /// Close the error modal. Only the UI state changes.
    pub fn dismiss_error(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.error().is_some() {
            state.ui = UiState::Idle;
            true
        } else {
            false
        }
    }

    fn show_error(&self, err: &FormError) {
        self.state.borrow_mut().ui = UiState::error(err.user_message());
    }

    fn fail(&self, err: FormError) -> Resolution {
        self.show_error(&err);
        Resolution::Failed(err)
    }

    /// Render the form and, if open, the error modal.
    pub fn render(&self, markup: &Markup) -> Result<String, MarkupError> {
        markup.render(&self.state.borrow())
    }
}

/// Returns the form from `Locating` to `Idle` when a resolution ends, unless
/// the resolution was superseded or already moved the form elsewhere.
struct LocatingGuard<'a> {
    state: &'a RefCell<SearchState>,
    current: &'a Cell<u64>,
    generation: u64,
}

impl Drop for LocatingGuard<'_> {
    fn drop(&mut self) {
        if self.current.get() != self.generation {
            return;
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if state.is_locating() {
                state.ui = UiState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchen_geo::{FixedGeolocator, PositionError};
    use branchen_geocoding::ApiResult;
    use std::rc::Rc;

    struct StaticGeocoder;

    impl ReverseGeocoder for StaticGeocoder {
        async fn reverse(&self, _coordinate: Coordinate) -> ApiResult<Place> {
            Ok(Place {
                display_name: Some("Mitte, Berlin".into()),
                ..Place::default()
            })
        }
    }

    type Pushed = Rc<RefCell<Vec<String>>>;

    fn form(locator: FixedGeolocator) -> (SearchForm<FixedGeolocator, StaticGeocoder, impl Fn(&str)>, Pushed) {
        let pushed: Pushed = Rc::default();
        let sink = Rc::clone(&pushed);
        let navigator = move |url: &str| sink.borrow_mut().push(url.to_string());
        (SearchForm::new(locator, StaticGeocoder, navigator), pushed)
    }

    #[test]
    fn test_focus_opens_suggestions_only_when_empty_and_available() {
        let (f, _) = form(FixedGeolocator::at(Coordinate::new(52.5, 13.4)));
        f.focus_where();
        assert!(f.state().suggestions_visible());

        let (f, _) = form(FixedGeolocator::at(Coordinate::new(52.5, 13.4)));
        f.set_where("Köln");
        f.focus_where();
        assert!(!f.state().suggestions_visible());

        let (f, _) = form(FixedGeolocator::unavailable());
        f.focus_where();
        assert!(!f.state().suggestions_visible());
    }

    #[test]
    fn test_stale_blur_ticket_is_ignored() {
        let (f, _) = form(FixedGeolocator::at(Coordinate::new(52.5, 13.4)));
        f.focus_where();
        let first = f.blur_where();
        assert!(f.close_suggestions(first));

        f.focus_where();
        assert!(!f.close_suggestions(first));
        assert!(f.state().suggestions_visible());
    }

    #[test]
    fn test_submit_navigates() {
        let (f, pushed) = form(FixedGeolocator::unavailable());
        f.set_what("Zahnarzt");
        f.set_where("Berlin (Mitte)");

        assert_eq!(f.submit().unwrap(), "/branchen/zahnarzt/berlin_mitte");
        assert_eq!(*pushed.borrow(), vec!["/branchen/zahnarzt/berlin_mitte".to_string()]);
    }

    #[test]
    fn test_empty_submit_shows_error_and_does_not_navigate() {
        let (f, pushed) = form(FixedGeolocator::unavailable());
        assert!(matches!(f.submit(), Err(FormError::MissingSearchInput)));
        assert!(pushed.borrow().is_empty());
        assert_eq!(f.state().error(), Some(crate::messages::MISSING_SEARCH_INPUT));
    }

    #[test]
    fn test_modal_body_click_keeps_error() {
        let (f, _) = form(FixedGeolocator::unavailable());
        let _ = f.submit();
        assert!(!f.click_modal(ModalClick::Body));
        assert!(f.state().error().is_some());
        assert!(f.click_modal(ModalClick::Overlay));
        assert!(f.state().error().is_none());
    }

    #[tokio::test]
    async fn test_resolve_location_success() {
        let (f, _) = form(FixedGeolocator::at(Coordinate::new(52.5, 13.4)));
        let resolution = f.resolve_location().await;

        assert!(matches!(resolution, Resolution::Located(c) if c == Coordinate::new(52.5, 13.4)));
        let state = f.state();
        assert_eq!(state.coordinates, Some(Coordinate::new(52.5, 13.4)));
        assert_eq!(state.where_text, USE_MY_LOCATION);
        assert_eq!(state.ui, UiState::Idle);
        assert_eq!(f.last_place().and_then(|p| p.label()).as_deref(), Some("Mitte, Berlin"));
    }

    #[tokio::test]
    async fn test_resolve_location_unavailable() {
        let (f, _) = form(FixedGeolocator::unavailable());
        let resolution = f.resolve_location().await;
        assert!(matches!(resolution, Resolution::Failed(FormError::GeolocationUnavailable)));
        assert_eq!(f.state().error(), Some(crate::messages::GEOLOCATION_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_resolve_location_timeout() {
        let (f, _) = form(FixedGeolocator::failing(PositionError::Timeout));
        let _ = f.resolve_location().await;
        let state = f.state();
        assert_eq!(state.error(), Some(crate::messages::LOCATION_TIMEOUT));
        assert!(!state.is_locating());
        assert_eq!(state.coordinates, None);
    }

    #[tokio::test]
    async fn test_resolve_after_unmount_is_noop() {
        let (f, _) = form(FixedGeolocator::at(Coordinate::new(52.5, 13.4)));
        f.unmount();
        assert!(matches!(f.resolve_location().await, Resolution::Superseded));
        assert_eq!(f.state(), SearchState::new());
    }
}
