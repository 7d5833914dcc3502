mod commands;
mod host;
mod state;

pub use state::App;
