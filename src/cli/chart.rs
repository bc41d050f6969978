use anyhow::Result;
use clap::Parser;

use crate::{
    chart::{
        occurrence_series,
        render::{render_chart, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH},
    },
    errors::TrackerError,
    storage::document_storage::DocumentStorage,
    tracker::Tracker,
};

use super::output::print_warning;

#[derive(Debug, Parser)]
pub struct ChartCommand {
    item: String,
    #[arg(
        long,
        default_value_t = 60,
        value_parser = clap::value_parser!(u16).range(MIN_WIDTH as i64..=MAX_WIDTH as i64),
        help = "Width of the plot area in characters"
    )]
    width: u16,
    #[arg(
        long,
        default_value_t = 15,
        value_parser = clap::value_parser!(u16).range(MIN_HEIGHT as i64..=MAX_HEIGHT as i64),
        help = "Height of the plot area in characters"
    )]
    height: u16,
}

/// Command to process `chart` command. Plots how many times an item was recorded over time.
pub fn process_chart_command<S: DocumentStorage>(
    tracker: &Tracker<S>,
    ChartCommand {
        item,
        width,
        height,
    }: ChartCommand,
) -> Result<()> {
    if !tracker.document().contains(&item) {
        return Err(TrackerError::ItemNotFound(item).into());
    }

    let records = tracker.list_records(&item);
    if records.is_empty() {
        print_warning(&format!("Item '{item}' has no records yet, nothing to plot"));
        return Ok(());
    }

    let series = occurrence_series(records.iter().map(String::as_str));
    print!(
        "{}",
        render_chart(
            &format!("{item} - occurrences over time"),
            &series,
            width.into(),
            height.into(),
        )
    );
    Ok(())
}
