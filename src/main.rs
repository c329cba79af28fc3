//! Wheel builder CLI entrypoint.
//!
//! Thin wrapper around [`easywheel::pipeline`]: load the definition, probe
//! the interpreter, build, and report the wheel path on stdout.

use clap::Parser;
use easywheel::cli::Cli;
use easywheel::config::BuildConfig;
use easywheel::error::Result;
use easywheel::pipeline::{PipelineContext, build_wheel};
use easywheel::project::ProjectDefinition;
use easywheel::report::BuildReport;
use easywheel::rules::ProcessEnvironment;
use easywheel::tags::PythonProbe;
use std::io::Write;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Cli::parse().into_config(&ProcessEnvironment);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&config, &mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(config: &BuildConfig, stdout: &mut dyn Write) -> Result<()> {
    let project = ProjectDefinition::load(config.source())?;
    let host = PythonProbe::new(config.python.as_str()).probe()?;
    let output = build_wheel(&PipelineContext {
        project: &project,
        build_dir: config.build_dir(),
        host: &host,
        env: &ProcessEnvironment,
    })?;

    if config.info {
        let report = BuildReport::new(&project.name, &project.version, &output);
        writeln!(stdout, "{}", report.to_json()?)?;
    } else {
        writeln!(stdout, "{}", output.wheel_path)?;
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            if writeln!(stderr, "error: {err}").is_err() {
                // Best-effort reporting; the exit code still signals failure.
            }
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easywheel::error::{BuildError, ConfigError};

    #[test]
    fn success_exits_zero_silently() {
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Ok(()), &mut stderr), 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn failure_prints_prefixed_message_and_exits_one() {
        let err = BuildError::from(ConfigError::EmptyField { field: "name" });
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Err(err), &mut stderr), 1);
        let text = String::from_utf8(stderr).expect("utf-8 stderr");
        assert_eq!(text, "error: project name must not be empty\n");
    }
}
