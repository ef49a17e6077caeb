pub mod forecast;
pub mod locations;
pub mod source;
pub mod static_state;
pub mod zips;
