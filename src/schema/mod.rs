pub mod narration;
pub mod story;
pub mod theme;
