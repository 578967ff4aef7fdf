//! The shopping cart: line model, persistence and the page controller.

mod controller;
mod line;
mod store;

pub use controller::{CartController, LandingOutcome};
pub use line::{
    AddOptions, CartLine, MAX_QTY, MAX_UNIT_PRICE, Orientation, line_key, line_title, parse_qty,
};
pub use store::{CartStore, parse_lines};
