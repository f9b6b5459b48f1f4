mod app;
pub mod parse_input;
pub mod vector_input;

pub use app::App;
