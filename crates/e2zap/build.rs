use std::fs;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{Shell, generate_to};

// cli.rs only depends on clap + clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        panic!("OUT_DIR not set by Cargo");
    };
    let out_dir = Path::new(&out_dir);

    let mut cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap_or_else(|e| panic!("create {}: {e}", man_dir.display()));
    write_manpage(&cmd, &man_dir, "e2zap");
    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let name = format!("e2zap-{}", sub.get_name());
        write_manpage(&sub.clone().name(name.clone()), &man_dir, &name);
    }

    let completion_dir = out_dir.join("completions");
    fs::create_dir_all(&completion_dir)
        .unwrap_or_else(|e| panic!("create {}: {e}", completion_dir.display()));
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate_to(shell, &mut cmd, "e2zap", &completion_dir)
            .unwrap_or_else(|e| panic!("generate {shell} completions: {e}"));
    }
}

fn write_manpage(cmd: &clap::Command, dir: &Path, name: &str) {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .unwrap_or_else(|e| panic!("render man page for `{name}`: {e}"));
    let path = dir.join(format!("{name}.1"));
    fs::write(&path, buf).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}
