//! `url`: build the search URL for typed inputs

use super::coordinate;
use crate::output::print_json;
use crate::Context;
use branchen_core::{Error, Result};
use branchen_search_form::{build_search_url, location_slug, search_slug, validate, SearchState};
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct UrlArgs {
    /// Search term (category or free text)
    #[arg(long, default_value = "")]
    what: String,

    /// Place name as typed into the "where" field
    #[arg(long = "where", default_value = "")]
    where_text: String,

    /// Latitude of a previously resolved device position
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of a previously resolved device position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Radius in kilometres for searches around the device (default from config)
    #[arg(long)]
    radius: Option<u32>,
}

#[derive(Serialize)]
struct UrlOutput<'a> {
    url: &'a str,
    what_slug: String,
    where_slug: Option<String>,
    device_location: bool,
}

pub fn run(ctx: &Context, args: UrlArgs) -> Result<()> {
    let state = SearchState {
        what: args.what,
        where_text: args.where_text,
        coordinates: coordinate(args.lat, args.lon)?,
        ..SearchState::default()
    };
    validate(&state).map_err(|e| Error::missing_search_input().with_source(e))?;

    let radius = args.radius.unwrap_or(ctx.config.schema.search.radius_km);
    let url = build_search_url(&state, radius);
    tracing::debug!(%url, "Built search URL");

    if ctx.json {
        let device_location = state.uses_device_location();
        print_json(&UrlOutput {
            url: &url,
            what_slug: search_slug(&state.what),
            where_slug: (!device_location && !state.where_text.is_empty())
                .then(|| location_slug(&state.where_text)),
            device_location,
        })
    } else {
        println!("{url}");
        Ok(())
    }
}
