use clap::Parser;
use nhl_schedule_api::api::DefaultApiContext;
use nhl_schedule_api::cli::Args;
use nhl_schedule_api::config::Config;
use nhl_schedule_api::constants::dev_keys;
use nhl_schedule_api::error::AppError;
use nhl_schedule_api::logging::setup_logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path).await?,
        None => Config::load().await?,
    };

    let (log_file_path, _guard) =
        setup_logging(config.log_file_path.as_ref(), args.debug).await?;
    info!("Logs are being written to: {log_file_path}");

    let context = DefaultApiContext::from_config(&config)?;

    // The CLI authenticates like any other client. Outside production it
    // falls back to the built-in development key.
    let api_key = args.api_key.clone().or_else(|| {
        if config.is_production {
            None
        } else {
            Some(dev_keys::DEVELOPMENT_KEY.to_string())
        }
    });
    let authorization = api_key.map(|key| format!("Bearer {key}"));
    let customer = context.authorize(authorization.as_deref()).await?;
    info!("Running as {} on {} plan", customer.name, customer.plan);

    let output = run_query(&context, &args).await?;
    println!("{output}");

    Ok(())
}

async fn run_query(context: &DefaultApiContext, args: &Args) -> Result<String, AppError> {
    let value = if args.today {
        serde_json::to_value(context.todays_games().await)?
    } else if args.yesterday {
        serde_json::to_value(context.yesterday_games().await)?
    } else if args.upcoming {
        serde_json::to_value(context.upcoming_games().await)?
    } else if let Some(week) = args.week {
        serde_json::to_value(context.weekly_game_count(week, args.year).await)?
    } else if let (Some(start), Some(end)) = (&args.start_date, &args.end_date) {
        serde_json::to_value(
            context
                .games_by_date_range(start, end, args.team.as_deref())
                .await?,
        )?
    } else if args.start_date.is_some() || args.end_date.is_some() {
        return Err(AppError::config_error(
            "--start-date and --end-date must be given together",
        ));
    } else if let Some(team) = &args.team {
        serde_json::to_value(context.team(team).await)?
    } else {
        serde_json::to_value(context.games().await)?
    };

    Ok(serde_json::to_string_pretty(&value)?)
}
