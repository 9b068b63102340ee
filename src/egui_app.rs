//! Desktop UI split into controller logic and egui rendering.

pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
