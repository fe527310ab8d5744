// Launchpad Math Package

pub mod constants;
pub mod curve;
pub mod error;
pub mod mul_div;

// Re-export commonly used items from constants
pub use constants::*;

pub use curve::{fee_part, gross_for_net, swap_input_for_output, swap_output};
pub use error::{MathError, MathResult};
pub use mul_div::{div_round_up, mul_div, Rounding};
