//! Helper functions shared by the page layer
//!
//! URL generation and HTML escaping used by the SEO module and templates.

mod html;
mod url;

pub use html::*;
pub use url::*;
