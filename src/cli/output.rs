use ansi_term::{Colour, Style};

use crate::tracker::ItemSummary;

fn header(columns: &[&str]) -> String {
    Style::new().bold().paint(columns.join("\t")).to_string()
}

/// Item listing, numbered from 1 like the rows of a table.
pub fn format_items(items: &[ItemSummary]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}\t{}\t{}\n", index + 1, item.name, item.last_recorded))
        .collect()
}

pub fn format_records(records: &[String]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| format!("{}\t{record}\n", index + 1))
        .collect()
}

pub fn print_items(items: &[ItemSummary]) {
    if items.is_empty() {
        println!("No items yet. Add one with `timetally item add <NAME>`");
        return;
    }
    println!("{}", header(&["#", "Name", "Last recorded"]));
    print!("{}", format_items(items));
}

pub fn print_records(item_name: &str, records: &[String]) {
    if records.is_empty() {
        println!("No records for '{item_name}'");
        return;
    }
    println!("{}", header(&["#", "Time"]));
    print!("{}", format_records(records));
}

pub fn print_success(message: &str) {
    println!("{}", Colour::Green.paint(message));
}

pub fn print_warning(message: &str) {
    println!("{}", Colour::Yellow.paint(message));
}
