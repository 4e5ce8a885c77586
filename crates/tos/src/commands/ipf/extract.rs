use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tos_ipf::IpfArchive;
use tracing::info;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input IPF archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting existing files in the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let mut ipf = IpfArchive::new(&mut f)?;

        info!(
            "extracting {} entries to {}",
            ipf.len(),
            self.directory.display()
        );
        ipf.extract_all_with_overwrite(&self.directory, self.overwrite)?;

        Ok(())
    }
}
