//! Source generator for the Gf vector, range, quaternion, dual quaternion and
//! matrix classes.
//!
//! Each family is described by a small set of Tera templates. The generator
//! enumerates every supported (scalar, dimension) combination, renders the
//! templates once per combination, and either writes the results into the
//! source tree or checks that the committed files are still in sync.

pub mod config;
pub mod driver;
pub mod error;
pub mod format;
pub mod logging;
pub mod naming;
pub mod scalar;
pub mod spec;
pub mod template;
pub mod validate;
pub mod writer;

pub use config::{CliArgs, GeneratorConfig, Mode};
pub use driver::{RunSummary, render_templates, run};
pub use error::{DriftError, RenderError};
pub use logging::{LoggingConfig, init_logging};
pub use scalar::{Scalar, allow_implicit_conversion};
pub use spec::{Family, OutputPattern, Spec, SpecSet};
pub use template::TemplateEnvironment;
pub use writer::{DestinationAreas, OutputWriter, WriteStatus};
