use crate::entities::{Property, PropertyType};
use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

/// Half-open price intervals used by the dashboard's price selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBand {
    Low,
    Mid,
    High,
}

impl PriceBand {
    pub const LOW_CEILING: f64 = 500_000.0;
    pub const MID_CEILING: f64 = 1_000_000.0;

    /// `[min, max)` bounds of the band.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            PriceBand::Low => (0.0, Self::LOW_CEILING),
            PriceBand::Mid => (Self::LOW_CEILING, Self::MID_CEILING),
            PriceBand::High => (Self::MID_CEILING, f64::INFINITY),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        let (min, max) = self.bounds();
        price >= min && price < max
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::Low => "low",
            PriceBand::Mid => "mid",
            PriceBand::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::Low => "Under 500K",
            PriceBand::Mid => "500K - 1M",
            PriceBand::High => "Over 1M",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(PropertyType),
}

impl TypeFilter {
    pub fn matches(&self, property_type: PropertyType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == property_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse().map(TypeFilter::Only)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(kind) => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceFilter {
    #[default]
    All,
    Band(PriceBand),
}

impl PriceFilter {
    pub fn matches(&self, price: f64) -> bool {
        match self {
            PriceFilter::All => true,
            PriceFilter::Band(band) => band.contains(price),
        }
    }
}

impl FromStr for PriceFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PriceFilter::All),
            "low" => Ok(PriceFilter::Band(PriceBand::Low)),
            "mid" => Ok(PriceFilter::Band(PriceBand::Mid)),
            "high" => Ok(PriceFilter::Band(PriceBand::High)),
            other => Err(DomainError::ParseError(format!(
                "Unknown price range: {} (expected all, low, mid or high)",
                other
            ))),
        }
    }
}

impl fmt::Display for PriceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceFilter::All => f.write_str("all"),
            PriceFilter::Band(band) => f.write_str(band.as_str()),
        }
    }
}

/// The three dashboard criteria. A listing is visible when it passes all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    pub search_query: String,
    pub type_filter: TypeFilter,
    pub price_filter: PriceFilter,
}

impl PropertyFilter {
    pub fn new(
        search_query: impl Into<String>,
        type_filter: TypeFilter,
        price_filter: PriceFilter,
    ) -> Self {
        Self {
            search_query: search_query.into(),
            type_filter,
            price_filter,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.search_query.is_empty()
            && self.type_filter == TypeFilter::All
            && self.price_filter == PriceFilter::All
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.matches_text(property)
            && self.type_filter.matches(property.property_type)
            && self.price_filter.matches(property.price)
    }

    fn matches_text(&self, property: &Property) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let needle = self.search_query.to_lowercase();
        property.location.to_lowercase().contains(&needle)
            || property.title.to_lowercase().contains(&needle)
    }

    /// Order-preserving subsequence of `properties` that passes every criterion.
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        properties
            .iter()
            .filter(|property| self.matches(property))
            .cloned()
            .collect()
    }
}
