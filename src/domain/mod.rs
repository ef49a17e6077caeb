pub mod astronomy;
pub mod weather;
