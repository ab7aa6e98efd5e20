//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::FaqEntry;
pub use site::ServerConfig;
pub use site::SignupConfig;
pub use site::SiteConfig;
pub use site::StoreKind;
