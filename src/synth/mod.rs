//! Generating Go source from resolved method sets.
//!
//! Everything here returns text; callers decide where it goes.

pub mod interface;
pub mod mock;
pub mod naming;
pub mod requires;
pub mod stub;

pub use interface::{intersect_all, render_interface};
pub use mock::render_mock;
pub use naming::{auto_name, param_names};
pub use requires::interface_requires;
pub use stub::render_stub;
