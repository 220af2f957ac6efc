pub mod session;

pub use session::{load_session, require_session};
