//! CLI argument definitions for the wheel builder.
//!
//! Kept apart from the binary so argument parsing can be tested without
//! running a build.

use crate::config::{BuildConfig, DEFAULT_BUILD_DIR, DEFAULT_SOURCE_DIR, resolve_python};
use crate::rules::Environment;
use camino::Utf8PathBuf;
use clap::Parser;

/// Build a Python wheel from a package definition.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "easywheel")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build a Python wheel from a package definition.\n\n",
    "The source directory must contain package.json (or package.toml) ",
    "describing the distribution name, version, interpreter constraint, and ",
    "the files to ship. The wheel is written to the build directory and its ",
    "path printed on stdout.",
))]
#[command(after_help = concat!(
    "ENVIRONMENT:\n",
    "  EASYWHEEL_PYTHON    Interpreter used for tag probing (overridden by --python)\n",
    "  RUST_LOG            Log filter, e.g. debug or easywheel=trace\n\n",
    "EXAMPLES:\n",
    "  Build from the current directory:\n",
    "    $ easywheel\n\n",
    "  Build another project into dist/ and show the report:\n",
    "    $ easywheel -S ../demo -B dist -I\n",
))]
pub struct Cli {
    /// Directory containing the package definition, or the definition file.
    #[arg(short = 'S', long, value_name = "DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source: Utf8PathBuf,

    /// Directory receiving the staging tree and the wheel.
    #[arg(short = 'B', long, value_name = "DIR", default_value = DEFAULT_BUILD_DIR)]
    pub build: Utf8PathBuf,

    /// Print the JSON build report instead of only the wheel path.
    #[arg(short = 'I', long)]
    pub info: bool,

    /// Interpreter used for tag probing [default: $EASYWHEEL_PYTHON or python3].
    #[arg(long, value_name = "PATH")]
    pub python: Option<String>,
}

impl Cli {
    /// Resolve the run configuration, consulting `env` for the interpreter.
    #[must_use]
    pub fn into_config(self, env: &dyn Environment) -> BuildConfig {
        let python = resolve_python(self.python.as_deref(), env);
        BuildConfig {
            source: self.source,
            build_dir: self.build,
            python,
            info: self.info,
        }
    }
}
