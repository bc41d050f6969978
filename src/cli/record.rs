use anyhow::Result;
use clap::Subcommand;

use crate::{storage::document_storage::DocumentStorage, tracker::Tracker};

use super::output::{print_records, print_success};

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    #[command(about = "Record an occurrence of an item, now unless --at is given")]
    Add {
        item: String,
        #[arg(long, help = "Moment of the occurrence, formatted as \"YYYY-MM-DD HH:MM:SS\"")]
        at: Option<String>,
    },
    #[command(about = "Change the time of a record")]
    Edit {
        item: String,
        #[arg(help = "Current time of the record, \"YYYY-MM-DD HH:MM:SS\"")]
        old: String,
        #[arg(help = "New time of the record, \"YYYY-MM-DD HH:MM:SS\"")]
        new: String,
    },
    #[command(about = "Delete a record")]
    Delete {
        item: String,
        #[arg(help = "Time of the record, \"YYYY-MM-DD HH:MM:SS\"")]
        timestamp: String,
    },
    #[command(about = "List records of an item, oldest first")]
    List { item: String },
}

/// Command to process `record` subcommands. Every change is followed by a fresh listing of the
/// item's records.
pub async fn process_record_command<S: DocumentStorage>(
    tracker: &mut Tracker<S>,
    command: RecordCommand,
) -> Result<()> {
    let item = match command {
        RecordCommand::Add { item, at } => {
            let timestamp = match at {
                Some(timestamp) => {
                    tracker.add_record(&item, &timestamp).await?;
                    timestamp
                }
                None => tracker.record_now(&item).await?,
            };
            print_success(&format!("Recorded '{item}' at {timestamp}"));
            item
        }
        RecordCommand::Edit { item, old, new } => {
            tracker.edit_record(&item, &old, &new).await?;
            print_success(&format!("Record {old} of '{item}' changed to {new}"));
            item
        }
        RecordCommand::Delete { item, timestamp } => {
            tracker.delete_record(&item, &timestamp).await?;
            print_success(&format!("Deleted record {timestamp} of '{item}'"));
            item
        }
        RecordCommand::List { item } => item,
    };
    print_records(&item, tracker.list_records(&item));
    Ok(())
}
