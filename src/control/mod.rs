pub mod command;
pub mod controller;
