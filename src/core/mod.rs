pub mod error;
pub mod params;
pub mod plan;
pub mod trip;

pub use error::TripError;
pub use params::PlanParams;
pub use plan::{Attraction, DayPlan, Hotel, Meals, TripPlan};
pub use trip::{SavedTrip, TripStatus};
