use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("astv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive workbench for syntax-tree transformations")
        .arg(
            Arg::new("source")
                .help("Source file to parse and transform")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("rule")
                .long("rule")
                .short('r')
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("tree").long("tree").action(ArgAction::SetTrue))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_hint(ValueHint::FilePath),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "astv", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "astv", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "astv", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
