use std::io::Write;
use std::path::PathBuf;

use clap::CommandFactory;
use remote_git::{ClientFactory, detect_client_type};

use crate::Cli;

const BIN_NAME: &str = "remote-git";

fn completion_script(shell: clap_complete::Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut out = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut out);
    out
}

fn main_man_page() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut out = Vec::new();
    clap_mangen::Man::new(Cli::command()).render(&mut out)?;
    Ok(out)
}

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
) -> Result<(), Box<dyn std::error::Error>> {
    std::io::stdout().write_all(&completion_script(shell))?;
    Ok(())
}

pub(crate) fn handle_man(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            clap_mangen::generate_to(Cli::command(), &dir)?;
            println!("Generated man pages in: {}", dir.display());
        }
        None => std::io::stdout().write_all(&main_man_page()?)?,
    }
    Ok(())
}

/// Registered backend types, one per line.
pub(crate) fn handle_types() -> Result<(), Box<dyn std::error::Error>> {
    for client_type in ClientFactory::new()?.types() {
        println!("{client_type}");
    }
    Ok(())
}

/// Print the backend type `url` would get without `--type`.
pub(crate) fn handle_detect(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", detect_client_type(url)?);
    Ok(())
}
