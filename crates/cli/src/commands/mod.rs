pub mod reset;
pub mod seed;
pub mod status;
