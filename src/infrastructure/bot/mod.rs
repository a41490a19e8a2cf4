pub mod hand_analyzer;
pub mod provider;
pub mod strategies;
