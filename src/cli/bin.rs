use std::{
    env,
    error::Error,
    io::{self, Write},
};

use tracing_subscriber::EnvFilter;

mod app;
pub(crate) use app::App;

mod cmds;
mod find_repo;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

// Filter directives for log output, e.g. `GITOBJ_LOG=gitobj=debug`.
const LOG_ENV: &str = "GITOBJ_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Fails only if a global subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[allow(unused_must_use)]
#[cfg(not(tarpaulin_include))]
fn main() {
    // The actual gitobj executable (main fn) doesn't seem to be reachable via Tarpaulin.
    // We put as little as possible into this function so we can reach the rest via
    // other test coverage.

    init_logging();

    let work_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("ERROR: unable to read current directory: {}", err);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut app = App {
        arg_matches: app::clap_app().get_matches(),
        work_dir,
        stdin: &mut stdin,
        stdout: &mut stdout,
    };

    let r = app.run();

    app.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) if err.is::<cmds::SilentFailure>() => 1,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    });
}
