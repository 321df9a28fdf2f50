pub mod demographic;
pub mod real_estate;
pub mod user;

pub use demographic::DemographicData;
pub use real_estate::{next_available_id, RealEstate};
pub use user::User;
