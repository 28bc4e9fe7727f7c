use rideshare_core::{MarketplaceApi, ResourceStatus, SearchQuery, UtcDateTime};

use crate::cli::{BookArgs, IdArgs, KindArg, KindArgs, ResourceArgs, SearchArgs, StatusArgs};
use crate::error::CliError;

use super::{parse_id, CommandResult};

pub async fn list(args: &KindArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    match args.kind {
        KindArg::Ride => CommandResult::from_api(api.rides().list().await),
        KindArg::Parcel => CommandResult::from_api(api.parcels().list().await),
    }
}

pub async fn get(args: &ResourceArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    let id = parse_id(&args.id)?;
    match args.kind {
        KindArg::Ride => CommandResult::from_api(api.rides().get_by_id(&id).await),
        KindArg::Parcel => CommandResult::from_api(api.parcels().get_by_id(&id).await),
    }
}

pub async fn search(args: &SearchArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    let query = search_query(args)?;
    match args.kind {
        KindArg::Ride => CommandResult::from_api(api.rides().search(&query).await),
        KindArg::Parcel => CommandResult::from_api(api.parcels().search(&query).await),
    }
}

pub async fn book(args: &BookArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    let id = parse_id(&args.id)?;
    CommandResult::from_api(api.rides().book(&id, args.seats).await)
}

pub async fn accept(args: &IdArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    let id = parse_id(&args.id)?;
    CommandResult::from_api(api.parcels().accept(&id).await)
}

pub async fn cancel(args: &ResourceArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    let id = parse_id(&args.id)?;
    match args.kind {
        KindArg::Ride => CommandResult::from_api(api.rides().cancel(&id).await),
        KindArg::Parcel => CommandResult::from_api(api.parcels().cancel(&id).await),
    }
}

pub async fn status(args: &StatusArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    let id = parse_id(&args.id)?;
    let status: ResourceStatus = args.status.parse()?;
    match args.kind {
        KindArg::Ride => CommandResult::from_api(api.rides().update_status(&id, status).await),
        KindArg::Parcel => CommandResult::from_api(api.parcels().update_status(&id, status).await),
    }
}

fn search_query(args: &SearchArgs) -> Result<SearchQuery, CliError> {
    let mut query = SearchQuery::new();
    if let Some(origin) = &args.origin {
        query = query.with_origin(origin.parse()?);
    }
    if let Some(destination) = &args.destination {
        query = query.with_destination(destination.parse()?);
    }
    if let Some(departure) = &args.departure {
        query = query.with_departure_time(UtcDateTime::parse(departure)?);
    }
    if let Some(seats) = args.seats {
        query = query.with_seats(seats);
    }
    if let Some(size) = &args.size {
        query = query.with_size(size.parse()?);
    }
    if let Some(max_weight) = args.max_weight {
        query = query.with_max_weight(max_weight);
    }
    Ok(query)
}
