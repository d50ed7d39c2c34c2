use crate::writer::DestinationAreas;
use anyhow::Result;
use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_TEMPLATE_DIR: &str = "resources/templates";
const DEFAULT_SRC_DIR: &str = "src/pxr/gf";
const DEFAULT_BINDINGS_DIR: &str = "src/python";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write generated files into the permanent source tree.
    Generate,
    /// Render into a scratch directory and compare against the source tree.
    Validate,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Generate => write!(f, "generate"),
            Mode::Validate => write!(f, "validate"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub mode: Mode,
    pub template_dir: PathBuf,
    pub areas: DestinationAreas,
    /// Parent of the validate-mode scratch directory; system temp dir if unset.
    pub scratch_parent: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            validate,
            project_root,
            templates,
            src_dir,
            bindings_dir,
        } = args;

        let project_root = project_root.unwrap_or_else(|| PathBuf::from("."));
        let resolve = |path: Option<PathBuf>, default: &str| match path {
            Some(path) if path.is_absolute() => path,
            Some(path) => project_root.join(path),
            None => project_root.join(default),
        };

        Ok(Self {
            mode: if validate { Mode::Validate } else { Mode::Generate },
            template_dir: resolve(templates, DEFAULT_TEMPLATE_DIR),
            areas: DestinationAreas::new(
                resolve(src_dir, DEFAULT_SRC_DIR),
                resolve(bindings_dir, DEFAULT_BINDINGS_DIR),
            ),
            scratch_parent: None,
        })
    }

    /// Layout rooted at `project_root` with the default sub-directories.
    pub fn for_project<P: AsRef<Path>>(project_root: P, mode: Mode) -> Self {
        let root = project_root.as_ref();
        Self {
            mode,
            template_dir: root.join(DEFAULT_TEMPLATE_DIR),
            areas: DestinationAreas::new(root.join(DEFAULT_SRC_DIR), root.join(DEFAULT_BINDINGS_DIR)),
            scratch_parent: None,
        }
    }

    pub fn with_scratch_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.scratch_parent = Some(parent.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.template_dir.exists(),
            "template directory {:?} does not exist",
            self.template_dir
        );
        anyhow::ensure!(
            self.template_dir.is_dir(),
            "template directory {:?} is not a directory",
            self.template_dir
        );
        if let Some(parent) = self.scratch_parent.as_ref() {
            anyhow::ensure!(
                parent.is_dir(),
                "scratch parent {:?} is not a directory",
                parent
            );
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "gf-codegen",
    about = "Generate the Gf vector, range, quaternion and matrix sources from templates",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        help = "Render into a temporary directory and fail if the committed files differ"
    )]
    pub validate: bool,

    #[arg(
        long,
        value_name = "DIR",
        help = "Project root the default directories are resolved against"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Template directory (default: resources/templates)"
    )]
    pub templates: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Destination of headers and implementation files (default: src/pxr/gf)"
    )]
    pub src_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Destination of Python binding files (default: src/python)"
    )]
    pub bindings_dir: Option<PathBuf>,
}
