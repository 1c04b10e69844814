//! HTTP gateway in front of the link store.
//!
//! The gateway only translates HTTP into [`LinkStore`](leafy_core::LinkStore)
//! calls: `POST /shorten` creates a link, `GET /{code}` renders a preview page
//! for its destination, and `GET /` serves the static index page.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod preview;
pub mod state;

pub use app::App;
pub use state::AppState;
