pub mod cluster;
pub mod features;
pub mod input;
pub mod medication;
pub mod prediction;
