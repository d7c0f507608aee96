/*!
Process boundary.

  <program> [-v|-vv] [-q] [--param-file PATH] <command> [args...]

Global flags are only recognized before the command; every token after it is
handed to the dispatcher untouched (including ones starting with `-`).

Env:
  TOSHELL_PARAM_FILE   fallback for --param-file
  RUST_LOG             overrides the level derived from -v / -q
*/

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use crate::cmd::{Dispatcher, Exit, Request, ShellOptions, load_param_file};
use crate::tool::Tool;
use crate::utils;

pub const PARAM_FILE_ENV: &str = "TOSHELL_PARAM_FILE";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Expose a tool's commands on the command line",
    disable_help_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all non-error log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Load named overrides from a JSON or YAML object; command-line name=value wins
    #[arg(long = "param-file", value_name = "PATH")]
    pub param_file: Option<PathBuf>,

    /// Command followed by its positional and name=value arguments
    #[arg(value_name = "COMMAND", trailing_var_arg = true)]
    pub tokens: Vec<String>,
}

impl Cli {
    /// Parameter file from the flag, falling back to `TOSHELL_PARAM_FILE`.
    pub fn effective_param_file(&self) -> Option<PathBuf> {
        self.param_file.clone().or_else(|| {
            std::env::var(PARAM_FILE_ENV)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
        })
    }
}

/// Run `tool` against the current process's arguments and standard streams.
pub fn run<T: Tool>(tool: T) -> ExitCode {
    run_with(tool, ShellOptions::default())
}

pub fn run_with<T: Tool>(tool: T, mut options: ShellOptions) -> ExitCode {
    if options.program.is_none() {
        options.program = program_name();
    }
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let dispatcher = Dispatcher::with_options(tool, options);
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let exit = launch(&dispatcher, &cli, &mut stdout.lock(), &mut stderr.lock());
    exit.into()
}

/// Everything after flag parsing: parameter file merge and dispatch.
pub fn launch<T: Tool>(
    dispatcher: &Dispatcher<T>,
    cli: &Cli,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Exit {
    let mut request = Request::parse(&cli.tokens);

    if let Some(path) = cli.effective_param_file() {
        match load_param_file(&path) {
            Ok(params) => {
                if let Some(req) = request.as_mut() {
                    req.set_fallback(params);
                }
            }
            Err(e) => {
                let _ = writeln!(err, "{e:#}");
                return Exit::Failure;
            }
        }
    }

    let exit = dispatcher.run_request(request, out, err);
    debug!("exit status {}", exit.code());
    exit
}

fn program_name() -> Option<String> {
    let arg0 = std::env::args_os().next()?;
    let name = PathBuf::from(arg0)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())?;
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{Arguments, CommandSpec};
    use anyhow::Result;
    use serde_json::{Value, json};

    struct Echo;

    impl Tool for Echo {
        fn commands(&self) -> Vec<CommandSpec> {
            vec![
                CommandSpec::new("echo")
                    .required("text")
                    .optional("times", 1)
                    .optional("upper", false),
            ]
        }

        fn call(&self, _command: &str, args: &Arguments) -> Result<Value> {
            let mut text = args.str("text")?.repeat(args.int("times")? as usize);
            if args.bool("upper")? {
                text = text.to_uppercase();
            }
            Ok(json!(text))
        }
    }

    fn dispatcher() -> Dispatcher<Echo> {
        Dispatcher::with_options(
            Echo,
            ShellOptions {
                help: true,
                program: Some("echo-tool".into()),
            },
        )
    }

    fn launch_with(cli: &Cli) -> (Exit, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let exit = launch(&dispatcher(), cli, &mut out, &mut err);
        (
            exit,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn flags_before_command_only() {
        let cli = Cli::try_parse_from(["prog", "-vv", "echo", "-q", "x=1"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert_eq!(cli.tokens, ["echo", "-q", "x=1"]);
    }

    #[test]
    fn no_tokens_is_allowed() {
        let cli = Cli::try_parse_from(["prog", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.tokens.is_empty());
    }

    #[test]
    fn launch_runs_command() {
        let cli = Cli::try_parse_from(["prog", "echo", "ab", "times=2", "upper=true"]).unwrap();
        let (exit, out, err) = launch_with(&cli);
        assert_eq!(exit, Exit::Success);
        assert_eq!(out, "\"ABAB\"\n");
        assert!(err.is_empty());
    }

    #[test]
    fn param_file_supplies_overrides_cli_wins() {
        let mut f = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        f.write_all(b"times: 3\nupper: true\n").unwrap();
        let path = f.path().to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "prog",
            "--param-file",
            path.as_str(),
            "echo",
            "z",
            "upper=false",
        ])
        .unwrap();
        let (exit, out, _) = launch_with(&cli);
        assert_eq!(exit, Exit::Success);
        assert_eq!(out, "\"zzz\"\n");
    }

    #[test]
    fn param_file_does_not_clash_with_positional_values() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        f.write_all(br#"{ "text": "file", "times": 3, "upper": true }"#).unwrap();
        let path = f.path().to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["prog", "--param-file", path.as_str(), "echo", "z", "2"])
            .unwrap();
        let (exit, out, err) = launch_with(&cli);
        assert_eq!(exit, Exit::Success, "stderr: {err}");
        assert_eq!(out, "\"ZZ\"\n");
    }

    #[test]
    fn bad_param_file_fails() {
        let cli = Cli::try_parse_from([
            "prog",
            "--param-file",
            "/nonexistent/params.json",
            "echo",
            "z",
        ])
        .unwrap();
        let (exit, out, err) = launch_with(&cli);
        assert_eq!(exit, Exit::Failure);
        assert!(out.is_empty());
        assert!(err.contains("failed to read param file"));
    }

    #[test]
    fn usage_when_no_command() {
        let cli = Cli::try_parse_from(["prog"]).unwrap();
        let (exit, out, _) = launch_with(&cli);
        assert_eq!(exit, Exit::Success);
        assert!(out.starts_with("Usage: echo-tool command [args...]\n"));
        assert!(out.contains("  echo  text [times=1] [upper=false]\n"));
    }
}
