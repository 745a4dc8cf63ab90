// ViewerContext middleware and the extractors handlers use to read it

pub mod viewer_context_extractor;
pub mod viewer_context_middleware;

pub use viewer_context_extractor::{login_redirect, AuthenticatedViewer, Vc};
pub use viewer_context_middleware::viewer_context_middleware;
