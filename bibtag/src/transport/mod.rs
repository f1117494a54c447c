// bibtag/src/transport/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{MockCall, MockTransport};
pub use traits::Transport;
