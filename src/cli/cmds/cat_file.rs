use std::io::Write;

use crate::{cmds::SilentFailure, find_repo, App, Result};

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};
use gitobj::object::Id;
use gitobj::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content or type and size information for repository objects")
        .arg(
            Arg::with_name("p")
                .short("p")
                .help("Pretty-print the contents of <object> based on its type"),
        )
        .arg(Arg::with_name("t").short("t").help("Show the object type"))
        .arg(Arg::with_name("s").short("s").help("Show the object size"))
        .arg(
            Arg::with_name("e")
                .short("e")
                .help("Exit with zero status if <object> exists and is a valid object"),
        )
        .group(
            ArgGroup::with_name("mode")
                .args(&["p", "t", "s", "e"])
                .required(true),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The name of the object to show"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let name = args.value_of("object").unwrap_or_default();
    let id: Id = name
        .parse()
        .map_err(|_| format!("Not a valid object name {}", name))?;

    let repo = find_repo::from_path(&app.work_dir)?;

    if args.is_present("e") {
        return match repo.get(&id) {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => Err(SilentFailure.into()),
            Err(err) => Err(err.into()),
        };
    }

    let object = repo.get(&id)?;

    if args.is_present("p") {
        app.write_all(object.payload())?;
    } else if args.is_present("t") {
        writeln!(app, "{}", object.kind())?;
    } else if args.is_present("s") {
        writeln!(app, "{}", object.len())?;
    }

    Ok(())
}
