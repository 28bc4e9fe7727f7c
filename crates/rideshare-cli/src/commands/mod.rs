mod offers;
mod resources;

use rideshare_core::{ApiReport, ApiResult, MarketplaceApi, ResourceId};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Rendered command output plus the failure, if any, that sets the exit code.
pub struct CommandResult {
    pub data: Value,
    pub failure: Option<CliError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            failure: None,
        }
    }

    pub fn failed(data: Value, failure: CliError) -> Self {
        Self {
            data,
            failure: Some(failure),
        }
    }

    /// Wraps a transport outcome in its `{ ok, ... }` report shape.
    pub fn from_api<T: Serialize>(result: ApiResult<T>) -> Result<Self, CliError> {
        let data = serde_json::to_value(ApiReport::from(&result))?;
        Ok(match result {
            Ok(_) => Self::ok(data),
            Err(error) => Self::failed(data, CliError::Api(error)),
        })
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Validate(args) => offers::validate(args),
        Command::Submit(args) => offers::submit(args, &api(cli)?).await,
        Command::List(args) => resources::list(args, &api(cli)?).await,
        Command::Get(args) => resources::get(args, &api(cli)?).await,
        Command::Search(args) => resources::search(args, &api(cli)?).await,
        Command::Book(args) => resources::book(args, &api(cli)?).await,
        Command::Accept(args) => resources::accept(args, &api(cli)?).await,
        Command::Cancel(args) => resources::cancel(args, &api(cli)?).await,
        Command::Status(args) => resources::status(args, &api(cli)?).await,
    }
}

fn api(cli: &Cli) -> Result<MarketplaceApi, CliError> {
    match &cli.base_url {
        Some(base_url) => Ok(MarketplaceApi::for_base_url(base_url)?),
        None => Ok(MarketplaceApi::from_env()),
    }
}

fn parse_id(raw: &str) -> Result<ResourceId, CliError> {
    Ok(ResourceId::parse(raw)?)
}
