pub mod rendering;
pub mod scheduler;
pub mod services;

pub use scheduler::FrameLoop;
pub use services::{BrowserTimeProvider, ConsoleLogger};
