//! Feature preprocessing applied before model fitting or scoring.

pub mod winsorizer;

pub use winsorizer::Winsorizer;
