//! Terminal output for diagnoses, store listings and notices.

use std::fmt::Write as _;
use std::io::IsTerminal;

use krishi_core::{formatted_spans, PlaceDetails, Section, StoreRecord};
use krishi_flow::Notice;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub(crate) fn notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("{notice}");
    }
}

pub(crate) fn sections(sections: &[Section]) {
    let styled = std::io::stdout().is_terminal();
    for section in sections {
        if let Some(heading) = section.heading() {
            println!();
            println!("{}", emphasize(&heading, styled));
        }
        if !section.content.is_empty() {
            println!("{}", styled_text(&section.content, styled));
        }
    }
}

pub(crate) fn store_list(stores: &[StoreRecord]) {
    if stores.is_empty() {
        println!("No stores found.");
        return;
    }
    for (index, store) in stores.iter().enumerate() {
        println!("{}", store_line(index + 1, store));
    }
}

pub(crate) fn store_summary(store: &StoreRecord) {
    println!("{}", store.name);
    if !store.address.is_empty() {
        println!("  {}", store.address);
    }
    println!("  at {}", store.coordinates());
}

pub(crate) fn place_details(details: &PlaceDetails) {
    println!("{}", details.name);
    if !details.formatted_address.is_empty() {
        println!("  {}", details.formatted_address);
    }
    if let Some(phone) = &details.formatted_phone_number {
        println!("  phone: {phone}");
    }
    if let Some(website) = &details.website {
        println!("  web: {website}");
    }
    let hours = details.hours();
    if !hours.is_empty() {
        println!("  hours:");
        for line in hours {
            println!("    {line}");
        }
    }
}

fn store_line(position: usize, store: &StoreRecord) -> String {
    let mut line = format!("{position:>2}. {}", store.name);
    if !store.address.is_empty() {
        let _ = write!(line, ", {}", store.address);
    }
    if store.place_id().is_none() {
        line.push_str(" (no details)");
    }
    line
}

/// Renders `**bold**` runs with terminal bold, or drops the markers when
/// output is not a terminal.
fn styled_text(text: &str, styled: bool) -> String {
    formatted_spans(text)
        .into_iter()
        .map(|span| {
            if span.bold {
                emphasize(&span.text, styled)
            } else {
                span.text
            }
        })
        .collect()
}

fn emphasize(text: &str, styled: bool) -> String {
    if styled {
        format!("{BOLD}{text}{RESET}")
    } else {
        text.to_string()
    }
}
