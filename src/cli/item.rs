use anyhow::Result;
use clap::Subcommand;

use crate::{storage::document_storage::DocumentStorage, tracker::Tracker};

use super::output::{print_items, print_success};

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    #[command(about = "Start tracking a new item")]
    Add { name: String },
    #[command(about = "Rename an item, keeping its records")]
    Rename { old_name: String, new_name: String },
    #[command(about = "Delete an item together with all of its records")]
    Delete { name: String },
    #[command(about = "List items with the time they were last recorded")]
    List,
}

/// Command to process `item` subcommands. Every change is followed by a fresh listing.
pub async fn process_item_command<S: DocumentStorage>(
    tracker: &mut Tracker<S>,
    command: ItemCommand,
) -> Result<()> {
    match command {
        ItemCommand::Add { name } => {
            tracker.add_item(&name).await?;
            print_success(&format!("Added item '{name}'"));
        }
        ItemCommand::Rename { old_name, new_name } => {
            tracker.edit_item(&old_name, &new_name).await?;
            print_success(&format!("Renamed '{old_name}' to '{new_name}'"));
        }
        ItemCommand::Delete { name } => {
            tracker.delete_item(&name).await?;
            print_success(&format!("Deleted item '{name}'"));
        }
        ItemCommand::List => {}
    }
    print_items(&tracker.list_items());
    Ok(())
}
