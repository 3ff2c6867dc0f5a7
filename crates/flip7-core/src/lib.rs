pub mod game;
pub mod model;
pub mod strategy;
