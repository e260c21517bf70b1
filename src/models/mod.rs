mod diagnosis;
mod doctor;
mod medicine;
mod patient;
mod visit;

pub use diagnosis::*;
pub use doctor::*;
pub use medicine::*;
pub use patient::*;
pub use visit::*;
