use serde::Serialize;
use stepplan_core::{dates, WorkItem};

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

// ---------------------------------------------------------------------------
// Plan rows
// ---------------------------------------------------------------------------

const ITEM_HEADERS: [&str; 12] = [
    "ROW", "NO", "KIND", "DESCRIPTION", "ACCOUNTABLE", "START", "END", "DAYS", "PROGRESS",
    "MODE", "COLOR", "ID",
];

pub fn print_items(items: &[WorkItem]) {
    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let description = if item.is_task() {
                format!("  {}", item.description)
            } else {
                item.description.clone()
            };
            vec![
                (i + 1).to_string(),
                item.number(),
                item.kind.to_string(),
                description,
                item.accountable.clone(),
                dates::iso(item.start),
                dates::iso(item.end),
                item.work_days.to_string(),
                format!("{}%", item.progress),
                item.mode.to_string(),
                item.color.clone(),
                item.id.short(),
            ]
        })
        .collect();
    print_table(&ITEM_HEADERS, rows);
}

pub fn print_item_detail(item: &WorkItem) {
    println!("{} {}: {}", item.kind, item.number(), item.description);
    println!("  id:          {}", item.id);
    if !item.accountable.is_empty() {
        println!("  accountable: {}", item.accountable);
    }
    println!("  start:       {}", dates::display(item.start));
    println!("  end:         {}", dates::display(item.end));
    println!("  work days:   {}", item.work_days);
    println!("  progress:    {}%", item.progress);
    println!("  link:        {}", item.mode);
    println!("  color:       {}", item.color);
}
