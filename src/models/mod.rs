pub mod enums;
pub mod practitioner;

pub use enums::{Category, ALL_CATEGORIES};
pub use practitioner::PractitionerRecord;
