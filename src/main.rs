mod cli;
mod cmd;

use chrono::Local;
use clap::Parser;
use cli::{CatalogAction, Cli, Commands, ConfigAction, ProfileAction};
use std::process;
use tracing_subscriber::EnvFilter;

use nutrilog::output;

/// Diagnostics go to stderr so stdout stays a single JSON document.
/// `NUTRILOG_LOG` takes an EnvFilter directive; `NUTRILOG_LOG_FORMAT=json`
/// switches to JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("NUTRILOG_LOG").unwrap_or_else(|_| EnvFilter::new("nutrilog=warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let json = std::env::var("NUTRILOG_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let command = cli.command.name();
    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let human = cli.human;
    let user = cli.user;

    let result = match cli.command {
        Commands::Init { skip } => cmd::init::run(skip, user.as_deref()),
        Commands::Log {
            meal_type,
            description,
            quantity,
            nutrients,
            calories,
            carbs,
            protein,
            fat,
            batch,
            dry_run,
        } => {
            if let Some(batch_json) = batch {
                cmd::log::run_batch(&batch_json, user.as_deref(), today, human)
            } else {
                cmd::log::run(
                    cmd::log::LogArgs {
                        meal_type: meal_type.unwrap_or_default(),
                        description: description.unwrap_or_default(),
                        quantity,
                        nutrients,
                        calories,
                        carbs,
                        protein,
                        fat,
                        dry_run,
                    },
                    user.as_deref(),
                    today,
                    human,
                )
            }
        }
        Commands::Update {
            id,
            meal_type,
            description,
            quantity,
            nutrients,
            on,
        } => cmd::update::run(id, meal_type, description, quantity, &nutrients, on, human),
        Commands::Delete { id } => cmd::delete::run(id, human),
        Commands::Show { raw } => cmd::show::run(raw, user.as_deref(), human),
        Commands::Totals => cmd::totals::run_day(user.as_deref(), today, human),
        Commands::Week => cmd::totals::run_week(user.as_deref(), today, human),
        Commands::Calories { from, to } => {
            cmd::totals::run_calories(user.as_deref(), from, to, human)
        }
        Commands::Profile { action } => match action {
            ProfileAction::Show => cmd::profile::run_show(user.as_deref(), human),
            ProfileAction::Set {
                goal,
                age,
                gender,
                height,
                weight,
                activity,
                allergies,
            } => cmd::profile::run_set(
                user.as_deref(),
                cmd::profile::ProfileArgs {
                    goal,
                    age,
                    gender,
                    height,
                    weight,
                    activity,
                    allergies,
                },
                human,
            ),
            ProfileAction::Update {
                goal,
                age,
                gender,
                height,
                weight,
                activity,
                allergies,
            } => cmd::profile::run_update(
                user.as_deref(),
                cmd::profile::ProfileChanges {
                    goal,
                    age,
                    gender,
                    height,
                    weight,
                    activity,
                    allergies,
                },
                human,
            ),
            ProfileAction::Delete => cmd::profile::run_delete(user.as_deref(), human),
        },
        Commands::Recommend => cmd::recommend::run(user.as_deref(), human),
        Commands::Catalog { action } => match action {
            CatalogAction::Add {
                name,
                meal_type,
                diets,
                allergens,
                calories,
                serving,
            } => cmd::catalog::run_add(
                &name, &meal_type, &diets, &allergens, calories, serving, human,
            ),
            CatalogAction::List => cmd::catalog::run_list(human),
            CatalogAction::Import { file } => cmd::catalog::run_import(&file, human),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            cmd::completions::run(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(command, error = %format!("{:#}", e), "command failed");
        let err = output::failure(command, &e);
        match serde_json::to_string(&err) {
            Ok(s) => eprintln!("{}", s),
            Err(_) => eprintln!("{:#}", e),
        }
        process::exit(1);
    }
}
