pub mod artifacts;
pub mod features;
pub mod model;
pub mod prediction;
pub mod validation;
