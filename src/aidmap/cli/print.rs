use super::glyphs;
use aidmap::filters::{RegionFilter, SelectionMode};
use aidmap::model::Feature;
use aidmap::widgets::OptionList;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const CATEGORY_WIDTH: usize = 14;
const PARTNER_WIDTH: usize = 18;

const OPEN_AT: &str = "8. Office Open at";
const CLOSE_AT: &str = "9. Office close at";

/// Fields shown in the detail view, in display order. The leading
/// numerals come from the source data and are stripped for display.
const DETAIL_FIELDS: [&str; 8] = [
    "10. Referral Method",
    "6. Availability",
    "7. Availability Day",
    "1. Registration Type Requirement",
    "2. Nationality",
    "3. Intake Criteria",
    "4. Accessibility",
    "5. Coverage",
];

pub(crate) fn print_features(features: &[&Feature], details: bool) {
    if features.is_empty() {
        println!("No services match the current filters.");
        return;
    }

    for feature in features {
        print_feature_line(feature);
        if details {
            print_feature_details(feature);
        }
    }
}

pub(crate) fn print_summary(shown: usize, total: usize) {
    println!("{}", format!("{} of {} services shown", shown, total).dimmed());
}

fn print_feature_line(feature: &Feature) {
    let category = feature.label("activityCategory").unwrap_or("");
    let tag = format!("[{}]", category);
    let tag_padding = CATEGORY_WIDTH.saturating_sub(tag.width());
    let styled_tag = glyphs::style_for(category).apply_to(tag);

    let location = feature.label("locationName").unwrap_or("(unnamed)");
    let activity = feature.label("activityName").unwrap_or("");
    let title = if activity.is_empty() {
        location.to_string()
    } else {
        format!("{}: {}", location, activity)
    };

    let partner = feature.label("partnerName").unwrap_or("");

    let available = LINE_WIDTH.saturating_sub(CATEGORY_WIDTH + PARTNER_WIDTH + 2);
    let title_display = truncate_to_width(&title, available);
    let padding = available.saturating_sub(title_display.width());

    println!(
        "{}{} {}{} {}",
        styled_tag,
        " ".repeat(tag_padding),
        title_display,
        " ".repeat(padding),
        partner.dimmed()
    );
}

fn print_feature_details(feature: &Feature) {
    println!("    {} {}", "Hours:".bold(), office_hours(feature));

    for field in DETAIL_FIELDS {
        let name = display_name(field);
        println!("    {} {}", format!("{}:", name).bold(), field_text(feature, field));
    }

    if let (Some(start), Some(end)) = (feature.date("startDate"), feature.date("endDate")) {
        println!("    {} {} to {}", "Active:".bold(), start, end);
    }

    if let Some(comments) = feature.label("comments") {
        let trimmed = comments.trim();
        if !trimmed.is_empty() {
            println!("    {}", trimmed.dimmed());
        }
    }
    println!();
}

/// Compact office-hours line: both ends where known, one end
/// otherwise, "unknown" when neither is.
fn office_hours(feature: &Feature) -> String {
    let open = feature.first_flag(OPEN_AT);
    let close = feature.first_flag(CLOSE_AT);
    match (open, close) {
        (Some(open), Some(close)) => {
            format!("{} -{}", open, close.replace("Close at", ""))
        }
        (Some(open), None) => format!("Open at {}", open),
        (None, Some(close)) => close.to_string(),
        (None, None) => "unknown".to_string(),
    }
}

/// Strip the leading numeral the source data prefixes field names with.
fn display_name(field: &str) -> &str {
    match field.find(' ') {
        Some(i) => &field[i + 1..],
        None => field,
    }
}

/// A property rendered for display: flagged labels for the
/// booleans-keyed-by-label fields, the string itself for scalar
/// fields, "unknown" otherwise.
fn field_text(feature: &Feature, field: &str) -> String {
    let flags = feature.flags(field);
    if !flags.is_empty() {
        return flags.join(", ");
    }
    match feature.label(field) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "unknown".to_string(),
    }
}

pub(crate) fn print_groups(list: &OptionList) {
    if list.entries().is_empty() {
        println!("No options available.");
        return;
    }
    for entry in list.entries() {
        let mark = match (list.mode(), entry.selected) {
            (SelectionMode::And, true) => "(o)",
            (SelectionMode::And, false) => "( )",
            (SelectionMode::Or, true) => "[x]",
            (SelectionMode::Or, false) => "[ ]",
        };
        let count = match entry.count {
            Some(count) => format!(" ({})", count),
            None => String::new(),
        };
        let line = format!("{} {}{}", mark, entry.label, count);
        if entry.enabled {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

pub(crate) fn print_regions(filter: &RegionFilter) {
    if filter.regions().is_empty() {
        println!("No regions loaded.");
        return;
    }
    for region in filter.regions() {
        let mark = if filter.active().contains(&region.id) {
            "(o)"
        } else {
            "( )"
        };
        println!("{} {} {}", mark, region.name, region.id.dimmed());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
