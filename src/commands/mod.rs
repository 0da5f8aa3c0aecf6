pub mod health;
pub mod merge;
pub mod ranges;
pub mod split;
