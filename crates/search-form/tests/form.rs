//! End-to-end behaviour of the search form with controllable collaborators.

use branchen_geo::{Coordinate, FixedGeolocator, Geolocator, PositionError, PositionOptions};
use branchen_geocoding::{ApiError, ApiResult, Place, ReverseGeocoder};
use branchen_search_form::messages::{GEOCODING_FAILED, LOCATION_PERMISSION_DENIED, USE_MY_LOCATION};
use branchen_search_form::{FormConfig, Markup, ModalClick, Resolution, SearchForm, UiState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::Notify;

const BERLIN: Coordinate = Coordinate { latitude: 52.52, longitude: 13.405 };
const HAMBURG: Coordinate = Coordinate { latitude: 53.55, longitude: 9.99 };

/// Hands out the queued coordinates one request at a time, each only after
/// the gate is opened.
struct GatedGeolocator {
    gate: Rc<Notify>,
    queue: RefCell<Vec<Coordinate>>,
}

impl GatedGeolocator {
    fn new(gate: Rc<Notify>, mut coordinates: Vec<Coordinate>) -> Self {
        coordinates.reverse();
        Self {
            gate,
            queue: RefCell::new(coordinates),
        }
    }
}

impl Geolocator for GatedGeolocator {
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinate, PositionError> {
        let next = self.queue.borrow_mut().pop();
        self.gate.notified().await;
        next.ok_or(PositionError::PositionUnavailable)
    }
}

/// Succeeds for the first `successes` lookups, then answers 503.
struct FlakyGeocoder {
    successes: u32,
    calls: Cell<u32>,
}

impl FlakyGeocoder {
    fn new(successes: u32) -> Self {
        Self {
            successes,
            calls: Cell::new(0),
        }
    }
}

impl ReverseGeocoder for FlakyGeocoder {
    async fn reverse(&self, _coordinate: Coordinate) -> ApiResult<Place> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call < self.successes {
            Ok(Place {
                display_name: Some("Berlin, Deutschland".into()),
                ..Place::default()
            })
        } else {
            Err(ApiError::api_response(503, "Service Unavailable"))
        }
    }
}

type Pushed = Rc<RefCell<Vec<String>>>;

fn recorder() -> (Pushed, impl Fn(&str)) {
    let pushed: Pushed = Rc::default();
    let sink = Rc::clone(&pushed);
    (pushed, move |url: &str| sink.borrow_mut().push(url.to_string()))
}

#[tokio::test]
async fn test_locate_then_submit_searches_around_device() {
    let (pushed, navigator) = recorder();
    let config = FormConfig::default().with_radius_km(25);
    let form = SearchForm::with_config(FixedGeolocator::at(BERLIN), FlakyGeocoder::new(1), navigator, config);

    form.set_what("Italienisches Restaurant");
    form.focus_where();
    assert!(form.state().suggestions_visible());

    let resolution = form.select_device_location().await;
    assert!(matches!(resolution, Resolution::Located(c) if c == BERLIN));
    assert_eq!(form.state().where_text, USE_MY_LOCATION);

    let url = form.submit().unwrap();
    assert_eq!(
        url,
        "/branchen/italienisches_restaurant/standort?lat=52.52&lon=13.405&radius=25"
    );
    assert_eq!(*pushed.borrow(), vec![url]);
}

#[tokio::test]
async fn test_unmount_while_locating_discards_result() {
    let gate = Rc::new(Notify::new());
    let (_, navigator) = recorder();
    let form = SearchForm::new(
        GatedGeolocator::new(Rc::clone(&gate), vec![BERLIN]),
        FlakyGeocoder::new(1),
        navigator,
    );
    form.set_what("Pizza");

    let (resolution, ()) = tokio::join!(form.resolve_location(), async {
        assert!(form.state().is_locating());
        form.unmount();
        gate.notify_one();
    });

    assert!(matches!(resolution, Resolution::Superseded));
    let state = form.state();
    assert_eq!(state.what, "Pizza");
    assert_eq!(state.where_text, "");
    assert_eq!(state.coordinates, None);
    assert_eq!(state.error(), None);
    assert!(form.last_place().is_none());
}

#[tokio::test]
async fn test_newer_resolution_supersedes_older() {
    let gate = Rc::new(Notify::new());
    let (_, navigator) = recorder();
    let form = SearchForm::new(
        GatedGeolocator::new(Rc::clone(&gate), vec![BERLIN, HAMBURG]),
        FlakyGeocoder::new(2),
        navigator,
    );

    let (first, second, ()) = tokio::join!(form.resolve_location(), form.resolve_location(), async {
        gate.notify_waiters();
    });

    assert!(matches!(first, Resolution::Superseded));
    assert!(matches!(second, Resolution::Located(c) if c == HAMBURG));
    let state = form.state();
    assert_eq!(state.coordinates, Some(HAMBURG));
    assert_eq!(state.ui, UiState::Idle);
}

#[tokio::test]
async fn test_failed_lookup_keeps_previous_coordinates() {
    let (_, navigator) = recorder();
    let form = SearchForm::new(FixedGeolocator::at(BERLIN), FlakyGeocoder::new(1), navigator);

    assert!(matches!(form.resolve_location().await, Resolution::Located(_)));
    let resolution = form.resolve_location().await;

    assert!(matches!(resolution, Resolution::Failed(_)));
    let state = form.state();
    assert_eq!(state.error(), Some(GEOCODING_FAILED));
    assert_eq!(state.coordinates, Some(BERLIN));
    assert_eq!(state.where_text, USE_MY_LOCATION);
    assert!(!state.is_locating());
}

#[tokio::test]
async fn test_dismissing_error_keeps_inputs() {
    let (pushed, navigator) = recorder();
    let form = SearchForm::new(
        FixedGeolocator::failing(PositionError::PermissionDenied),
        FlakyGeocoder::new(1),
        navigator,
    );
    form.set_what("Friseur");
    form.set_where("Köln");

    let _ = form.resolve_location().await;
    assert_eq!(form.state().error(), Some(LOCATION_PERMISSION_DENIED));

    let markup = Markup::new().unwrap();
    assert!(form.render(&markup).unwrap().contains("location-modal-overlay"));

    assert!(!form.click_modal(ModalClick::Body));
    assert!(form.click_modal(ModalClick::DismissButton));

    let state = form.state();
    assert_eq!(state.ui, UiState::Idle);
    assert_eq!(state.what, "Friseur");
    assert_eq!(state.where_text, "Köln");
    assert_eq!(state.coordinates, None);
    assert!(!form.render(&markup).unwrap().contains("location-modal-overlay"));

    assert_eq!(form.submit().unwrap(), "/branchen/friseur/köln");
    assert_eq!(pushed.borrow().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_blur_closes_suggestions_after_grace() {
    let (_, navigator) = recorder();
    let form = SearchForm::new(FixedGeolocator::at(BERLIN), FlakyGeocoder::new(1), navigator);
    form.focus_where();

    let (closed, ()) = tokio::join!(form.blur_where_after(tokio::time::sleep), async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(form.state().suggestions_visible());
    });

    assert!(closed);
    assert!(!form.state().suggestions_visible());
}

#[tokio::test(start_paused = true)]
async fn test_suggestion_click_within_grace_wins() {
    let (_, navigator) = recorder();
    let form = SearchForm::new(FixedGeolocator::at(BERLIN), FlakyGeocoder::new(1), navigator);
    form.focus_where();

    let (closed, resolution) = tokio::join!(form.blur_where_after(tokio::time::sleep), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        form.select_device_location().await
    });

    assert!(!closed);
    assert!(matches!(resolution, Resolution::Located(_)));
    assert_eq!(form.state().where_text, USE_MY_LOCATION);
}
