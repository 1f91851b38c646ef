pub mod narration;
pub mod narrator;
pub mod story;
