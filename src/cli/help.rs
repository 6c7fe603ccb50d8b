//! Usage and per-command help text

use super::dispatch::CliError;
use std::io::Write;

pub const USAGE: &str = "\
Usage: git ssb [--version] [--help] [-v] [command]

Commands:
  create        Create a git repo on SSB
  fork          Fork a git repo on SSB
  forks         List forks of a repo
  name          Name a repo
  pull-request  Create a pull-request
  web           Serve a web server for repos
  help          Get help about a command";

const HELP_HELP: &str = "\
Usage: git ssb help <command>

  Get help about a git-ssb command

Options:
  command   Command to get help with";

const CREATE_HELP: &str = "\
Usage: git ssb create [<remote_name>]

  Create a new git-ssb repo and add it as a git remote

Options:
  remote_name   Name of the remote to add. default: 'ssb'";

const FORK_HELP: &str = "\
Usage: git ssb fork [<upstream>] <remote_name>

  Create a new git-ssb repo as a fork of another repo
  and add it as a git remote

Arguments:
  upstream      id, url, or git remote name of the repo to fork.
                default: 'origin' or 'ssb'
  remote_name   Name for the new remote";

const FORKS_HELP: &str = "\
Usage: git ssb forks [<repo>]

  List repos that are forks of the given repo

Arguments:
  repo      id, url, or git remote name of the base repo.
            default: 'origin' or 'ssb'";

const NAME_HELP: &str = "\
Usage: git ssb name [<repo>] <name>

  Publish a name for a git-ssb repo

Arguments:
  repo      id, url, or git remote name of the repo.
            default: 'origin' or 'ssb'
  name      the name to give the repo";

const PULL_REQUEST_HELP: &str = "\
Usage: git ssb pull-request [-b <base>] [-h <head>]
                            [-m <message> | -F <file>]

  Create a pull request. This requests that changes from <head>
  be merged into <base>.

Arguments:
  head      the head repo/branch, in format \"[<repo>:]<branch>\"
            Defaults to 'origin' or 'ssb', and the current branch.
  base      the base repo/branch, in format \"[<repo>:]<branch>\"
            where <repo> may be a repo id or git remote name.
            Defaults to the upstream of <head>, or <head>,
            and its default branch (usually 'master')
  message   the text for the pull-request message
  file      name of file from which to read pull-request text
            ('-' reads standard input)";

const WEB_HELP: &str = "\
Usage: git ssb web [<host:port>] [<options>]

  Host a git ssb web server

Options:
  host        Host to bind to. default: localhost
  port        Port to bind to. default: 7718
  --public    Make the instance read-only";

const VERSION_HELP: &str = "\
Usage: git ssb version

  Print the git-ssb version";

/// Help block for a command, if it has one.
pub fn command_help(command: &str) -> Option<&'static str> {
    match command {
        "help" => Some(HELP_HELP),
        "create" => Some(CREATE_HELP),
        "fork" => Some(FORK_HELP),
        "forks" => Some(FORKS_HELP),
        "name" => Some(NAME_HELP),
        "pull-request" => Some(PULL_REQUEST_HELP),
        "web" => Some(WEB_HELP),
        "version" => Some(VERSION_HELP),
        _ => None,
    }
}

/// Print help for `command`, or the usage when no command is given.
pub fn write_help(out: &mut dyn Write, command: Option<&str>) -> Result<(), CliError> {
    let text = match command {
        None => USAGE,
        Some(cmd) => command_help(cmd).ok_or_else(|| CliError::NoHelp(cmd.to_string()))?,
    };
    writeln!(out, "{}", text)?;
    Ok(())
}
