use std::io::Write;

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitobj::repo::on_disk::OnDisk;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty git repository")
        .arg(
            Arg::with_name("directory")
                .help("The directory to create the repository in (default: current directory)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let path = match args.value_of("directory") {
        Some(dir) => app.work_dir.join(dir),
        None => app.work_dir.clone(),
    };

    let repo = OnDisk::init(&path)?;

    writeln!(
        app,
        "Initialized empty Git repository in {}",
        repo.git_dir().display()
    )?;

    Ok(())
}
