// src/application/mod.rs
//
// Application Layer - the boundary handed to the presentation layer

pub mod state;

pub use state::AppState;
