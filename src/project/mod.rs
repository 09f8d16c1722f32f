// Locating and loading Go packages from disk
pub mod config;
pub mod file_loader;
pub mod loader;
pub mod locate;

pub use config::LoaderConfig;
pub use loader::ModuleLoader;
pub use locate::{Locate, SourceRoots};
