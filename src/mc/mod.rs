pub mod paths;
pub mod payoffs;
pub mod stats;
