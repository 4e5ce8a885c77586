use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tos_ipf::IpfArchive;

#[derive(Args)]
pub struct ListArgs {
    /// An input IPF archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let ipf = IpfArchive::new(&mut f)?;

        for entry in ipf.entries() {
            println!("{}\t{}", entry.archive_name, entry.file_name);
        }
        Ok(())
    }
}
