//! Pure plotting core: no browser types below this line.

pub mod animation;
pub mod errors;
pub mod function;
pub mod logging;
pub mod plot;
pub mod state;
