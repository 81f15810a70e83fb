pub mod config;
pub mod events;
pub mod gui;
pub mod history;
pub mod monitor;
pub mod sys;
