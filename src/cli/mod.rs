pub mod chart;
pub mod item;
pub mod output;
pub mod record;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chart::{process_chart_command, ChartCommand};
use clap::{Parser, Subcommand};
use item::{process_item_command, ItemCommand};
use record::{process_record_command, RecordCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    storage::document_storage::JsonFileStorage,
    tracker::Tracker,
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
        runtime::single_thread_runtime,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Timetally", version, long_about = None)]
#[command(about = "Keep a tally of when you do things", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Add, rename, delete or list tracked items")]
    Item {
        #[command(subcommand)]
        command: ItemCommand,
    },
    #[command(about = "Add, edit, delete or list records of an item")]
    Record {
        #[command(subcommand)]
        command: RecordCommand,
    },
    #[command(about = "Plot occurrences of an item over time")]
    Chart {
        #[command(flatten)]
        command: ChartCommand,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir.join("logs"), logging_level, args.log)?;

    single_thread_runtime()?.block_on(run_command(&app_dir, args.commands))
}

async fn run_command(app_dir: &Path, commands: Commands) -> Result<()> {
    let storage = JsonFileStorage::in_dir(app_dir);
    debug!("Using data file {:?}", storage.path());
    let mut tracker = Tracker::open(storage, Box::new(DefaultClock)).await;

    match commands {
        Commands::Item { command } => process_item_command(&mut tracker, command).await,
        Commands::Record { command } => process_record_command(&mut tracker, command).await,
        Commands::Chart { command } => process_chart_command(&tracker, command),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use clap::Parser;
    use tempfile::tempdir;

    use crate::{
        errors::TrackerError,
        storage::document_storage::{DocumentStorage, JsonFileStorage},
        utils::logging::TEST_LOGGING,
    };

    use super::{
        item::ItemCommand, record::RecordCommand, run_command, Args, Commands,
    };

    fn parse(args: &[&str]) -> Result<Commands> {
        Ok(Args::try_parse_from(std::iter::once("timetally").chain(args.iter().copied()))?.commands)
    }

    #[test]
    fn test_parse_item_commands() -> Result<()> {
        assert!(matches!(
            parse(&["item", "add", "Run"])?,
            Commands::Item { command: ItemCommand::Add { name } } if name == "Run"
        ));
        assert!(matches!(
            parse(&["item", "rename", "Run", "Jog"])?,
            Commands::Item { command: ItemCommand::Rename { old_name, new_name } }
                if old_name == "Run" && new_name == "Jog"
        ));
        assert!(matches!(
            parse(&["item", "list"])?,
            Commands::Item {
                command: ItemCommand::List
            }
        ));
        assert!(parse(&["item", "add"]).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_record_commands() -> Result<()> {
        assert!(matches!(
            parse(&["record", "add", "Run"])?,
            Commands::Record { command: RecordCommand::Add { item, at: None } } if item == "Run"
        ));
        assert!(matches!(
            parse(&["record", "add", "Run", "--at", "2024-01-01 09:00:00"])?,
            Commands::Record { command: RecordCommand::Add { at: Some(at), .. } }
                if at == "2024-01-01 09:00:00"
        ));
        assert!(matches!(
            parse(&["record", "edit", "Run", "2024-01-01 09:00:00", "2024-01-02 09:00:00"])?,
            Commands::Record { command: RecordCommand::Edit { old, new, .. } }
                if old == "2024-01-01 09:00:00" && new == "2024-01-02 09:00:00"
        ));
        Ok(())
    }

    #[test]
    fn test_parse_global_options() -> Result<()> {
        let args = Args::try_parse_from(["timetally", "chart", "Run", "--dir", "/tmp/x", "--log"])?;
        assert!(args.log);
        assert_eq!(args.dir.as_deref(), Some(std::path::Path::new("/tmp/x")));
        Ok(())
    }

    #[test]
    fn test_parse_chart_size_is_bounded() -> Result<()> {
        assert!(parse(&["chart", "Run", "--width", "500", "--height", "200"]).is_ok());
        assert!(parse(&["chart", "Run", "--width", "501"]).is_err());
        assert!(parse(&["chart", "Run", "--height", "201"]).is_err());
        assert!(parse(&["chart", "Run", "--width", "1"]).is_err());
        assert!(parse(&["chart", "Run", "--width", "18446744073709551615"]).is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_commands_against_directory() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;

        run_command(dir.path(), parse(&["item", "add", "Run"])?).await?;
        run_command(
            dir.path(),
            parse(&["record", "add", "Run", "--at", "2024-01-02 10:00:00"])?,
        )
        .await?;
        run_command(
            dir.path(),
            parse(&["record", "add", "Run", "--at", "2024-01-01 09:00:00"])?,
        )
        .await?;
        run_command(dir.path(), parse(&["chart", "Run"])?).await?;

        let document = JsonFileStorage::in_dir(dir.path()).load().await;
        let run = document.get("Run").unwrap();
        assert_eq!(run.records(), ["2024-01-01 09:00:00", "2024-01-02 10:00:00"]);
        assert_eq!(run.last_recorded, "2024-01-02 10:00:00");
        Ok(())
    }

    #[tokio::test]
    async fn test_run_command_reports_tracker_errors() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;

        let error = run_command(dir.path(), parse(&["chart", "Walk"])?)
            .await
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<TrackerError>(),
            Some(TrackerError::ItemNotFound(name)) if name == "Walk"
        ));

        run_command(dir.path(), parse(&["item", "add", "Run"])?).await?;
        let error = run_command(
            dir.path(),
            parse(&["record", "edit", "Run", "bad-date", "2024-02-02 08:00:00"])?,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<TrackerError>(),
            Some(TrackerError::InvalidTimestamp(_))
        ));
        Ok(())
    }
}
