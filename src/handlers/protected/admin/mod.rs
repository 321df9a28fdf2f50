pub mod demographic;
pub mod real_estate;
