pub mod candidate;
pub mod skill;
pub mod report;

pub use candidate::*;
pub use skill::*;
pub use report::*;
