//! `locate`: resolve a device position the way the form does
//!
//! The position comes from `--lat`/`--lon` (or a simulated platform error via
//! `--deny`), the reverse lookup goes to the configured Nominatim instance.

use crate::output::{print_json, Status};
use crate::Context;
use branchen_core::{Error, Result};
use branchen_geo::{Coordinate, FixedGeolocator, PositionError};
use branchen_geocoding::{ClientConfig, NominatimClient, Place};
use branchen_search_form::{FormConfig, Resolution, SearchForm, SearchState};
use branchen_telemetry::Timer;
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct LocateArgs {
    /// Device latitude
    #[arg(long, allow_negative_numbers = true, required_unless_present = "deny")]
    lat: Option<f64>,

    /// Device longitude
    #[arg(long, allow_negative_numbers = true, required_unless_present = "deny")]
    lon: Option<f64>,

    /// Search term to combine with the location
    #[arg(long, default_value = "")]
    what: String,

    /// Simulate a geolocation error code (1 denied, 2 unavailable, 3 timeout)
    #[arg(long, value_name = "CODE")]
    deny: Option<u16>,
}

#[derive(Serialize)]
struct LocateOutput<'a> {
    coordinates: Coordinate,
    place: Option<&'a Place>,
    label: Option<String>,
    url: &'a str,
    state: &'a SearchState,
}

pub async fn run(ctx: &Context, args: LocateArgs) -> Result<()> {
    let locator = match (args.deny, super::coordinate(args.lat, args.lon)?) {
        (Some(code), _) => FixedGeolocator::failing(PositionError::from_code(code)),
        (None, Some(coordinate)) => FixedGeolocator::at(coordinate),
        (None, None) => return Err(Error::validation("--lat and --lon are both required")),
    };

    let client_config = ClientConfig::from(&ctx.config.schema.geocoder).overlay_env()?;
    let geocoder = NominatimClient::with_config(client_config)?;
    tracing::debug!(base_url = %geocoder.config().base_url, "Using geocoder");

    let form = SearchForm::with_config(
        locator,
        geocoder,
        |_: &str| {},
        FormConfig::from(&ctx.config.schema.search),
    );
    form.set_what(args.what);

    let timer = Timer::start("locate");
    let resolution = form.resolve_location().await;
    timer.stop();

    let coordinates = match resolution {
        Resolution::Located(coordinate) => coordinate,
        Resolution::Failed(err) => return Err(err.into()),
        Resolution::Superseded => return Err(Error::internal("location resolution was cancelled")),
    };

    let url = form.submit()?;
    let place = form.last_place();
    let label = place.as_ref().and_then(Place::label);

    if ctx.json {
        return print_json(&LocateOutput {
            coordinates,
            place: place.as_ref(),
            label,
            url: &url,
            state: &form.state(),
        });
    }

    Status::success("Location resolved");
    Status::field("Coordinates", &coordinates.to_string());
    Status::field("Place", label.as_deref().unwrap_or("(unknown)"));
    println!("{url}");
    Ok(())
}
