pub mod auth;
pub mod catalog;
pub mod cowriter;
pub mod dashboard;
pub mod engine;
pub mod explore;
pub mod narration;
pub mod notice;
pub mod suggest;
