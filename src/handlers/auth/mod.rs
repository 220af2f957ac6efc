// handlers/auth/mod.rs - Browser login flow
//
// These routes only set and clear cookies; the session itself is checked by
// middleware::require_session.

pub mod google; // GET /auth/google, GET /auth/google/callback
pub mod login; // GET /login, GET /auth/logout

pub use google::{google_callback, google_login};
pub use login::{login_page, logout};
