use clap::Args;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, path::PathBuf};
use tos_ies::IesTable;

#[derive(Args)]
pub struct PrintArgs {
    /// An input IES table
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl PrintArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let table = IesTable::new(f)?;

        println!("{}", table.name().bold());
        println!("{}", table.columns().iter().map(|c| &c.name).join(","));
        for row in table.rows() {
            println!("{}", row.iter().join(","));
        }

        Ok(())
    }
}
