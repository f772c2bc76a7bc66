pub mod assistant;
pub mod health;
pub mod practitioners;
pub mod selection;
