use std::path::{Path, PathBuf};

use botforge_core::GeneratedFile;
use botforge_request::StarterRequest;
use clap::Args;
use dialoguer::{Confirm, theme::ColorfulTheme};
use eyre::{Context, Result};

use crate::reports::{InitReport, Report, TerminalOutput};

#[derive(Args)]
pub struct InitCommand {
    /// Bot file name (defaults to the current directory's name)
    #[arg(default_value = ".")]
    pub name: String,

    /// Output directory (defaults to ./<name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing request without asking
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let (file_name, output_dir) = Self::resolve_paths(&self.name, self.output.clone())?;
        let starter = StarterRequest::new(&file_name);

        let path = starter.path(&output_dir);
        if path.exists() && !self.force && !Self::confirm_overwrite(&path)? {
            println!("Left {} unchanged", path.display());
            return Ok(());
        }

        let write = starter
            .write(&output_dir)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

        InitReport {
            path,
            write,
            directory: (output_dir != Path::new(".")).then_some(output_dir),
        }
        .render(&mut TerminalOutput::new());
        Ok(())
    }

    fn confirm_overwrite(path: &Path) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Overwrite it?", path.display()))
            .default(false)
            .interact()
            .wrap_err("Failed to read confirmation")
    }

    fn resolve_paths(name: &str, output: Option<PathBuf>) -> Result<(String, PathBuf)> {
        if name == "." {
            let cwd = std::env::current_dir().wrap_err("Failed to get current directory")?;
            let dir_name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| eyre::eyre!("Current directory has no valid name"))?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            Ok((file_name_from(dir_name), output_dir))
        } else {
            let output_dir = output.unwrap_or_else(|| PathBuf::from(name));
            Ok((file_name_from(name), output_dir))
        }
    }
}

/// Turn a directory or project name into a valid bot file name.
fn file_name_from(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", cleaned)
    } else {
        cleaned
    }
}
