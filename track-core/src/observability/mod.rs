pub mod logging;
pub mod propagation;

pub use logging::init_tracing;
pub use propagation::{PropagateContext, outgoing_headers};
