pub mod catalog;
pub mod features;
pub mod input;
pub mod prediction;
