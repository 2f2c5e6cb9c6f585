use crate::command::{ExecutableCommand, Flow};
use crate::lexer::Tokens;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::io::Write;
use tracing::debug;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process without spawning a child. They are looked up before any
/// external program, so a program named `cd` on the search path is never launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Help,
    Exit,
}

/// Every builtin, in lookup and `help` listing order.
pub const BUILTINS: [Builtin; 3] = [Builtin::Cd, Builtin::Help, Builtin::Exit];

impl Builtin {
    /// Canonical name of the command, e.g. "cd" or "exit".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Help => "help",
            Builtin::Exit => "exit",
        }
    }

    /// Finds the builtin whose name is exactly `name`. Matching is case-sensitive.
    pub fn lookup(name: &str) -> Option<Self> {
        BUILTINS.into_iter().find(|builtin| builtin.name() == name)
    }
}

impl ExecutableCommand for Builtin {
    fn execute(&self, args: &Tokens<'_>, stdout: &mut dyn Write) -> Result<Flow> {
        match self {
            Builtin::Cd => change_dir(args),
            Builtin::Help => help(stdout),
            Builtin::Exit => Ok(Flow::Terminate),
        }
    }
}

/// Changes the working directory of the whole process to `args[1]`.
///
/// Later commands and every launched program inherit the new directory. Tokens after the
/// target are ignored.
fn change_dir(args: &Tokens<'_>) -> Result<Flow> {
    let target = args.get(1).ok_or_else(|| anyhow!("cd: missing argument"))?;
    env::set_current_dir(target).with_context(|| format!("cd: {target}"))?;
    debug!(dir = target, "changed working directory");
    Ok(Flow::Continue)
}

fn help(stdout: &mut dyn Write) -> Result<Flow> {
    writeln!(stdout, "Ishan Leung's C Shell")?;
    writeln!(stdout, "Type program names and arguments, and press the enter key.")?;
    writeln!(stdout, "The following are built-in commands:")?;
    for builtin in BUILTINS {
        writeln!(stdout, "  {}", builtin.name())?;
    }
    writeln!(stdout, "Use the man command for info on other programs. ")?;
    stdout.flush()?;
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split_into_tokens;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn run(line: &str) -> (Result<Flow>, String) {
        let tokens = split_into_tokens(line).unwrap();
        let builtin = Builtin::lookup(tokens.program().unwrap()).unwrap();
        let mut out = Vec::new();
        let res = builtin.execute(&tokens, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        assert_eq!(Builtin::lookup("cd"), Some(Builtin::Cd));
        assert_eq!(Builtin::lookup("help"), Some(Builtin::Help));
        assert_eq!(Builtin::lookup("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::lookup("CD"), None);
        assert_eq!(Builtin::lookup("exit2"), None);
        assert_eq!(Builtin::lookup(""), None);
    }

    #[test]
    fn test_registry_order() {
        let names: Vec<_> = BUILTINS.iter().map(|b| b.name()).collect();
        assert_eq!(names, ["cd", "help", "exit"]);
    }

    #[test]
    fn test_help_lists_builtins() {
        let expected = "Ishan Leung's C Shell\n\
                        Type program names and arguments, and press the enter key.\n\
                        The following are built-in commands:\n  \
                        cd\n  \
                        help\n  \
                        exit\n\
                        Use the man command for info on other programs. \n";

        let (res, out) = run("help");
        assert_eq!(res.unwrap(), Flow::Continue);
        assert_eq!(out, expected);

        let (res, out) = run("help me please");
        assert_eq!(res.unwrap(), Flow::Continue);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_exit_terminates_regardless_of_args() {
        let (res, out) = run("exit");
        assert_eq!(res.unwrap(), Flow::Terminate);
        assert!(out.is_empty());

        let (res, _) = run("exit 3 --help");
        assert_eq!(res.unwrap(), Flow::Terminate);
    }

    #[test]
    fn test_cd_without_target_is_an_error() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        let (res, out) = run("cd");
        let err = res.unwrap_err();
        assert_eq!(err.to_string(), "cd: missing argument");
        assert!(out.is_empty());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_changes_process_directory() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let target: PathBuf = tmp.path().canonicalize().unwrap();

        let (res, out) = run(&format!("cd {} ignored", target.display()));
        let after = env::current_dir().unwrap();
        env::set_current_dir(&before).unwrap();

        assert_eq!(res.unwrap(), Flow::Continue);
        assert!(out.is_empty());
        assert_eq!(after, target);
    }

    #[test]
    fn test_cd_to_missing_directory_keeps_directory() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does_not_exist");

        let (res, _) = run(&format!("cd {}", missing.display()));
        let err = res.unwrap_err();

        assert!(format!("{err:#}").starts_with(&format!("cd: {}: ", missing.display())));
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
