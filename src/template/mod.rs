//! Template rendering.
//!
//! - **environment**: [`TemplateEnvironment`], bound to the template root,
//!   renders one template for one spec.
//! - **helpers**: global functions available to every template.
//!
//! Templates see the spec's variables (`SCL`, `DIM`, `VEC`, ...), the global
//! helpers, and the spec-bound `LIST` / `MATRIX` formatters.

pub mod environment;
pub mod helpers;

pub use environment::TemplateEnvironment;
pub use helpers::register_globals;
