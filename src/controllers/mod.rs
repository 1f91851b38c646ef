pub mod health;
pub mod narrator;
pub mod story;
