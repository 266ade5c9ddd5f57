use querylog_application::use_cases::ToggleOutcome;
use querylog_domain::{
    Classification, ClassifiedEntry, FilteringStatus, LogFilter, PaginationCursor, RowTag,
    ToggleAction,
};

fn tag_label(tag: RowTag) -> &'static str {
    match tag {
        RowTag::Filtered => "BLOCKED",
        RowTag::Whitelisted => "ALLOWED",
        RowTag::Rewritten => "REWRITE",
        RowTag::None => "",
    }
}

fn classification_label(classification: &Classification) -> String {
    match classification {
        Classification::Normal => String::new(),
        Classification::Filtered { filter_name } => format!("filter: {}", filter_name),
        Classification::Whitelisted { filter_name } => format!("allowlist: {}", filter_name),
        Classification::Rewritten => String::new(),
        Classification::BlockedService { service_name } if service_name.is_empty() => {
            "blocked service".to_string()
        }
        Classification::BlockedService { service_name } => format!("service: {}", service_name),
    }
}

pub fn format_row(row: &ClassifiedEntry) -> String {
    let entry = &row.entry;
    let mut line = format!(
        "{}  {:<15}  {:<7}  {:<6}  {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        row.client_label(),
        tag_label(row.row_tag),
        entry.query_type,
        entry.domain,
    );

    if entry.has_responses() {
        line.push_str(&format!("  -> {}", entry.responses.join(", ")));
    }
    if let Some(annotation) = &row.annotation {
        line.push_str(&format!("  ({})", annotation));
    }

    let label = classification_label(&row.classification);
    if !label.is_empty() {
        line.push_str(&format!("  [{}", label));
        let is_service = matches!(row.classification, Classification::BlockedService { .. });
        if !row.display_rule.is_empty() && !is_service {
            line.push_str(&format!(" | {}", row.display_rule));
        }
        line.push(']');
    }

    if let Some(action) = row.suggested_action() {
        line.push_str(&format!("  <{}>", action.as_str()));
    }

    line
}

pub fn print_page(
    page: u32,
    cursor: &PaginationCursor,
    filter: &LogFilter,
    rows: &[ClassifiedEntry],
) {
    println!(
        "Page {} of {} ({} entries{})",
        page + 1,
        cursor.total_pages.max(1),
        rows.len(),
        if filter.is_empty() { "" } else { ", filtered" }
    );
    for row in rows {
        println!("{}", format_row(row));
    }
}

pub fn print_toggle(domain: &str, action: ToggleAction, outcome: &ToggleOutcome) {
    match &outcome.change {
        Some(change) => println!("{:?}: {}", change.kind, change.rule),
        None => println!("No change: {} already handled for {}", action.as_str(), domain),
    }

    match outcome.status.user_rules.override_for(domain) {
        Some(kind) => println!("Active override for {}: {:?}", domain, kind),
        None => println!("No override for {}", domain),
    }
}

pub fn print_status(status: &FilteringStatus) {
    println!(
        "Filtering: {}",
        if status.enabled { "enabled" } else { "disabled" }
    );
    println!("Custom rules: {} lines", status.user_rules.lines().count());

    if status.filters.is_empty() {
        println!("No filter lists");
        return;
    }

    println!("Filter lists:");
    for filter in &status.filters {
        println!(
            "  #{:<4} {:<8} {:>8} rules  {}",
            filter.id,
            if filter.enabled { "on" } else { "off" },
            filter.rules_count,
            filter.name,
        );
    }
}
