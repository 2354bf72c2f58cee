use catalog_duper_core::analysis::retention::{resolve_keep, MissingPricePolicy};
use catalog_duper_core::engine::{StatusKind, StatusMessage};
use catalog_duper_core::storage::models::DeletionLogEntry;
use catalog_duper_core::{AdminResponse, DuplicatePage};
use colored::*;

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("{:.2}", p),
        None => "n/a".to_string(),
    }
}

pub fn print_status(status: &StatusMessage) {
    match status.kind {
        StatusKind::Success => println!("{}", status.text.green()),
        StatusKind::Info => println!("{}", status.text.cyan()),
        StatusKind::Error => println!("{}", status.text.red().bold()),
    }
}

pub fn print_page(page: &DuplicatePage, policy: MissingPricePolicy) {
    println!("{}", "Found Potential Duplicates".bold());
    println!(
        "{:<32} {:>8} {:>10} {:<28} {:<19} {}",
        "Title", "ID", "Price", "Categories", "Date", ""
    );

    for group in &page.items {
        let keep_id = resolve_keep(&group.items, policy).map(|d| d.keep.id);
        for item in &group.items {
            let marker = if Some(item.id) == keep_id {
                "keep".green().to_string()
            } else {
                "dupe".red().to_string()
            };
            println!(
                "{:<32} {:>8} {:>10} {:<28} {:<19} {}",
                truncate(&group.title, 32),
                format!("#{}", item.id),
                format_price(item.price),
                truncate(&item.categories.join(", "), 28),
                item.created_at,
                marker
            );
        }
    }

    println!();
    println!("Page {} of {}", page.page, page.total_pages);
    println!(
        "Total duplicate groups found: {}",
        format!("{}", page.total).red()
    );
}

pub fn print_response(response: &AdminResponse, policy: MissingPricePolicy) {
    for status in &response.statuses {
        print_status(status);
    }
    if let Some(page) = &response.page {
        print_page(page, policy);
    }
}

pub fn print_deletion_log(entries: &[DeletionLogEntry]) {
    if entries.is_empty() {
        println!("{}", "No deleted items recorded.".cyan());
        return;
    }
    for entry in entries {
        println!(
            "{:<25} {:>8} {:>10} {}",
            entry.deleted_at,
            format!("#{}", entry.item_id),
            format_price(entry.price),
            entry.title
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
