use std::{fs, io::Write};

use crate::{find_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitobj::object::{hasher, Kind};
use gitobj::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally creates a blob from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .help("Specify the type (default 'blob')"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let kind = kind_from_args(args)?;
    let payload = payload_from_args(app, args)?;

    let id = if args.is_present("w") {
        let mut repo = find_repo::from_path(&app.work_dir)?;
        repo.put(kind, &payload)?
    } else {
        hasher::hash_object(kind, &payload)
    };

    writeln!(app, "{}", id)?;

    Ok(())
}

fn kind_from_args(args: &ArgMatches) -> Result<Kind> {
    match args.value_of("t") {
        Some(type_str) => type_str
            .parse::<Kind>()
            .map_err(|_| "-t must be one of blob, commit, tag, or tree".into()),
        None => Ok(Kind::Blob),
    }
}

fn payload_from_args(app: &mut App, args: &ArgMatches) -> Result<Vec<u8>> {
    let stdin = args.is_present("stdin");

    match (stdin, args.value_of("file")) {
        (false, Some(file)) => fs::read(app.work_dir.join(file))
            .map_err(|err| format!("could not open '{}' for reading: {}", file, err).into()),
        (true, None) => {
            let mut payload = Vec::new();
            app.stdin.read_to_end(&mut payload)?;
            Ok(payload)
        }
        _ => Err("content source must be either --stdin or a file path".into()),
    }
}
