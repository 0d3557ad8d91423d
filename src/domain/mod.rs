pub mod itinerary;
pub mod query;
