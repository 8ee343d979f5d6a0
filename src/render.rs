use domain::{AuthUser, ListingState, PriceFilter, Property, TypeFilter};
use std::fmt::Write;

pub const EMPTY_LISTING: &str = "No properties found. Add your first property to get started!";
pub const NOT_SIGNED_IN: &str = "Not signed in. Run `listr login` first.";

const MAX_AMENITIES: usize = 3;

/// US dollars with thousands separators, cents only when non-zero.
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let mut out = String::new();
    if price < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(cents / 100));

    let rest = cents % 100;
    if rest != 0 {
        let fraction = format!("{:02}", rest);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn amenities_line(amenities: &[String]) -> Option<String> {
    if amenities.is_empty() {
        return None;
    }
    let mut parts: Vec<String> = amenities.iter().take(MAX_AMENITIES).cloned().collect();
    if amenities.len() > MAX_AMENITIES {
        parts.push(format!("+{} more", amenities.len() - MAX_AMENITIES));
    }
    Some(parts.join(" · "))
}

pub fn property_card(property: &Property) -> String {
    let mut card = String::new();
    let _ = writeln!(
        card,
        "{} [{}]  ({})",
        property.title, property.property_type, property.property_id
    );
    let _ = writeln!(card, "  {}", property.location);

    let mut facts = vec![format!("{} sq.ft.", property.area)];
    if let Some(bedrooms) = property.bedrooms.filter(|n| *n > 0) {
        facts.push(format!("{} Beds", bedrooms));
    }
    let _ = writeln!(card, "  {}", facts.join(" · "));
    let _ = writeln!(card, "  {}", format_price(property.price));

    if let Some(line) = property.amenities.as_deref().and_then(amenities_line) {
        let _ = writeln!(card, "  {}", line);
    }
    let _ = write!(card, "  id: {}", property.id);
    card
}

/// The visible set as cards, or the empty-state hint.
pub fn listing(state: &ListingState) -> String {
    let visible = state.visible();
    if visible.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    let mut out = visible
        .iter()
        .map(property_card)
        .collect::<Vec<_>>()
        .join("\n\n");

    let filter = state.filter();
    if !filter.is_identity() {
        let _ = write!(
            out,
            "\n\nShowing {} of {} properties ({})",
            visible.len(),
            state.properties().len(),
            describe_filter(&filter.search_query, filter.type_filter, filter.price_filter)
        );
    }
    out
}

fn describe_filter(search: &str, type_filter: TypeFilter, price_filter: PriceFilter) -> String {
    let mut parts = Vec::new();
    if !search.is_empty() {
        parts.push(format!("matching \"{}\"", search));
    }
    if let TypeFilter::Only(kind) = type_filter {
        parts.push(kind.to_string());
    }
    if let PriceFilter::Band(band) = price_filter {
        parts.push(band.label().to_string());
    }
    parts.join(", ")
}

pub fn user_label(user: &AuthUser) -> String {
    match &user.email {
        Some(email) => format!("{} ({})", email, user.id),
        None => user.id.to_string(),
    }
}
