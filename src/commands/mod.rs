pub mod food_cmd;

pub use food_cmd::{handle_find, handle_nutrition, handle_setup};
