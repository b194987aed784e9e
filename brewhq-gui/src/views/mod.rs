//! Pages of the GUI, one `impl BrewApp` block per route

mod analysis;
mod chat;
mod new_project;
mod projects;
mod requirements;
