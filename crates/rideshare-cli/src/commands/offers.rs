use rideshare_core::{
    ApiReport, MarketplaceApi, ResourceKind, SubmitError, UtcDateTime, ValidationReport,
};

use crate::cli::{RecordArgs, ValidateArgs};
use crate::error::CliError;
use crate::input::read_record;

use super::CommandResult;

pub fn validate(args: &ValidateArgs) -> Result<CommandResult, CliError> {
    let record = read_record(&args.record.input)?;
    let now = match &args.now {
        Some(raw) => UtcDateTime::parse(raw)?,
        None => UtcDateTime::now(),
    };

    let result = rideshare_core::validate(ResourceKind::from(args.record.kind), &record, now);
    let data = serde_json::to_value(ValidationReport::from(&result))?;
    Ok(match result {
        Ok(_) => CommandResult::ok(data),
        Err(errors) => CommandResult::failed(data, CliError::Invalid(errors)),
    })
}

pub async fn submit(args: &RecordArgs, api: &MarketplaceApi) -> Result<CommandResult, CliError> {
    let record = read_record(&args.input)?;
    let kind = ResourceKind::from(args.kind);

    let error = match api.submit(kind, &record).await {
        Ok(created) => return CommandResult::from_api(Ok(created)),
        Err(error) => error,
    };

    let data = match &error {
        SubmitError::Invalid(errors) => {
            serde_json::to_value(ValidationReport::<()>::failed(errors))?
        }
        SubmitError::Transport(failure) => {
            serde_json::to_value(ApiReport::from(&Err::<(), _>(failure.clone())))?
        }
    };
    Ok(CommandResult::failed(data, CliError::from(error)))
}
