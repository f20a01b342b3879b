use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("astview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print a parsed syntax tree as collapsible indented text")
        .arg(
            Arg::new("tree")
                .help("JSON or YAML file holding the tree")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("variant")
                .long("variant")
                .value_parser(["all", "filtered"]),
        )
        .arg(Arg::new("depth").long("depth").short('d'))
        .arg(Arg::new("whitelist").long("whitelist").short('w'))
        .arg(Arg::new("active").long("active").short('a'))
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_parser(["json", "yaml"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_hint(ValueHint::FilePath),
        );

    generate_to(Bash, &mut cmd, "astview", &outdir)?;
    generate_to(Zsh, &mut cmd, "astview", &outdir)?;
    generate_to(Fish, &mut cmd, "astview", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
