pub mod diff;
pub mod text;
pub mod view;
