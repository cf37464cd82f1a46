//! Parallel-coordinate plot aggregate: sampling, range fitting,
//! classification, axis layouts, coordinate mapping and hover picking.

pub mod layout;
pub mod mapper;
pub mod picker;
pub mod services;
pub mod value_objects;

pub use layout::*;
pub use mapper::*;
pub use picker::*;
pub use services::*;
pub use value_objects::*;
