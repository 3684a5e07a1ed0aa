// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea CLI entrypoint.
//!
//! `check` imports `.lmn` files and reports what they contain; `convert`
//! imports one file and re-exports it in canonical form. The graphical
//! editor is a separate host built on the library crate.

use std::error::Error;
use std::path::{Path, PathBuf};

use galatea::store;
use galatea::workspace::Workspace;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} check <file.lmn> [<file.lmn> ...]\n  {program} convert <in.lmn> <out.lmn> [--sidecar <workspace.json>]\n\ncheck imports each file (in parallel) and reports graphs, rules and errors.\nconvert imports one file and re-exports it in canonical form; --sidecar\nadditionally writes the JSON workspace sidecar (names, positions, kinds)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Check {
        paths: Vec<PathBuf>,
    },
    Convert {
        input: PathBuf,
        output: PathBuf,
        sidecar: Option<PathBuf>,
    },
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<Command, ()> {
    let command = args.next().ok_or(())?;
    match command.as_str() {
        "check" => {
            let paths: Vec<PathBuf> = args.map(PathBuf::from).collect();
            if paths.is_empty() || paths.iter().any(|p| p.to_string_lossy().starts_with('-')) {
                return Err(());
            }
            Ok(Command::Check { paths })
        }
        "convert" => {
            let mut positional: Vec<PathBuf> = Vec::new();
            let mut sidecar: Option<PathBuf> = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--sidecar" => {
                        if sidecar.is_some() {
                            return Err(());
                        }
                        sidecar = Some(PathBuf::from(args.next().ok_or(())?));
                    }
                    _ if arg.starts_with('-') => return Err(()),
                    _ => positional.push(PathBuf::from(arg)),
                }
            }
            let [input, output] = positional.as_slice() else {
                return Err(());
            };
            Ok(Command::Convert {
                input: input.clone(),
                output: output.clone(),
                sidecar,
            })
        }
        _ => Err(()),
    }
}

fn run_check(paths: &[PathBuf]) -> bool {
    let imports = store::import_files(paths);
    let mut clean = true;

    for (path, import) in paths.iter().zip(&imports) {
        println!(
            "{}: {} graph(s), {} rule(s)",
            path.display(),
            import.graphs.len(),
            import.rules.len()
        );
        for error in &import.errors {
            clean = false;
            eprintln!("galatea: {}: {error}", path.display());
        }
    }

    clean
}

fn run_convert(
    input: &Path,
    output: &Path,
    sidecar: Option<&Path>,
) -> Result<bool, Box<dyn Error>> {
    let import = store::import_file(input);
    let mut clean = import.errors.is_empty();
    for error in &import.errors {
        eprintln!("galatea: {}: {error}", input.display());
    }

    let workspace = Workspace::from_import(import);
    let report = store::export_file(output, &workspace)?;
    for skipped in &report.skipped {
        clean = false;
        eprintln!("galatea: {skipped}");
    }
    println!("exported {}", report.path.display());

    if let Some(sidecar_path) = sidecar {
        store::save_workspace(sidecar_path, &workspace)?;
        println!("wrote sidecar {}", sidecar_path.display());
    }

    Ok(clean)
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "galatea".to_owned());

    let command = match parse_options(args) {
        Ok(command) => command,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    let result = match command {
        Command::Check { paths } => Ok(run_check(&paths)),
        Command::Convert {
            input,
            output,
            sidecar,
        } => run_convert(&input, &output, sidecar.as_deref()),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("galatea: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_options, Command};

    fn parse(args: &[&str]) -> Result<Command, ()> {
        parse_options(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn parses_check_with_one_file() {
        assert_eq!(
            parse(&["check", "a.lmn"]),
            Ok(Command::Check {
                paths: vec![PathBuf::from("a.lmn")],
            })
        );
    }

    #[test]
    fn parses_check_with_many_files() {
        assert_eq!(
            parse(&["check", "a.lmn", "b.lmn", "c.lmn"]),
            Ok(Command::Check {
                paths: vec![
                    PathBuf::from("a.lmn"),
                    PathBuf::from("b.lmn"),
                    PathBuf::from("c.lmn"),
                ],
            })
        );
    }

    #[test]
    fn rejects_check_without_files() {
        assert_eq!(parse(&["check"]), Err(()));
    }

    #[test]
    fn parses_convert() {
        assert_eq!(
            parse(&["convert", "in.lmn", "out.lmn"]),
            Ok(Command::Convert {
                input: PathBuf::from("in.lmn"),
                output: PathBuf::from("out.lmn"),
                sidecar: None,
            })
        );
    }

    #[test]
    fn parses_convert_with_sidecar() {
        assert_eq!(
            parse(&["convert", "in.lmn", "out.lmn", "--sidecar", "ws.json"]),
            Ok(Command::Convert {
                input: PathBuf::from("in.lmn"),
                output: PathBuf::from("out.lmn"),
                sidecar: Some(PathBuf::from("ws.json")),
            })
        );
    }

    #[test]
    fn rejects_convert_with_wrong_arity() {
        assert_eq!(parse(&["convert", "in.lmn"]), Err(()));
        assert_eq!(parse(&["convert", "a", "b", "c"]), Err(()));
    }

    #[test]
    fn rejects_duplicate_sidecar_flag() {
        assert_eq!(
            parse(&["convert", "a", "b", "--sidecar", "x", "--sidecar", "y"]),
            Err(())
        );
    }

    #[test]
    fn rejects_missing_sidecar_value() {
        assert_eq!(parse(&["convert", "a", "b", "--sidecar"]), Err(()));
    }

    #[test]
    fn rejects_unknown_commands_and_flags() {
        assert_eq!(parse(&["frobnicate"]), Err(()));
        assert_eq!(parse(&["convert", "a", "b", "--nope"]), Err(()));
        assert_eq!(parse(&[]), Err(()));
    }
}
