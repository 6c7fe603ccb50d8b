//! git-ssb CLI entry point

use clap::Parser;
use git_ssb::cli::{dispatch, Cli, Context, Output};
use git_ssb::core::Settings;
use git_ssb::git::GitCli;
use git_ssb::ssb::{SbotClient, WebProcess};
use git_ssb::telemetry::{init_logging, LogConfig};
use std::io::Write;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&LogConfig::from_verbosity(cli.verbose)) {
        eprintln!("warning: logging disabled: {}", e);
    }

    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let git = match GitCli::current_dir() {
        Ok(git) => git,
        Err(e) => {
            Output::fatal(&e.to_string());
            return 1;
        }
    };
    let settings = Settings::load(&git);
    tracing::debug!(?settings, "loaded settings");

    let sbot = SbotClient::new(&settings);
    let web = WebProcess::new(&settings);
    let ctx = Context {
        git: &git,
        repos: &sbot,
        log: &sbot,
        web: &web,
    };

    let mut stdout = std::io::stdout().lock();
    let result = dispatch(cli, &ctx, &mut stdout);
    let _ = stdout.flush();
    match result {
        Ok(()) => 0,
        Err(e) => {
            Output::fatal(&e.to_string());
            1
        }
    }
}
