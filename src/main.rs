use argh::FromArgs;
use lsh::{DEFAULT_PROMPT, Interpreter, ShellError, StreamReader, TerminalReader, logging};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

#[derive(FromArgs)]
/// Read commands from the terminal and run them one line at a time.
struct Args {
    #[argh(option, default = "String::from(logging::DEFAULT_FILTER)")]
    /// tracing filter for diagnostics on stderr, e.g. `debug`; defaults to `off`
    log: String,

    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// text printed before each line is read
    prompt: String,

    #[argh(switch)]
    /// read plain lines from stdin even when it is a terminal
    plain: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    if let Err(err) = logging::init(&args.log) {
        eprintln!("lsh: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lsh: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ShellError> {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if io::stdin().is_terminal() && !args.plain {
        Interpreter::new(TerminalReader::new()?)
            .with_prompt(args.prompt)
            .run(&mut stdout, &mut stderr)
    } else {
        let reader = StreamReader::new(io::stdin().lock(), io::stdout());
        Interpreter::new(reader)
            .with_prompt(args.prompt)
            .run(&mut stdout, &mut stderr)
    }
}
