pub mod constancy;
pub mod logger;
