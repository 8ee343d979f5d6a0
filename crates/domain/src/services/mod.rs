pub mod filter;
pub mod listing;
pub mod property_form;

pub use filter::{PriceBand, PriceFilter, PropertyFilter, TypeFilter};
pub use listing::{ListingController, ListingState, Navigation};
pub use property_form::{
    split_amenities, DraftError, FormTarget, PropertyDraft, PropertyFormController,
};
