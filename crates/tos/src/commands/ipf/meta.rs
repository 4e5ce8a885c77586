use clap::Args;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, path::PathBuf};
use tos_ipf::IpfArchive;

#[derive(Args)]
pub struct MetaArgs {
    /// An input IPF archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl MetaArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let ipf = IpfArchive::new(&mut f)?;

        let format = ipf.format().iter().map(|b| format!("{b:02X}")).join(" ");

        println!("{:<15}: {}", "File count".bold(), ipf.len());
        println!("{:<15}: {}", "File table".bold(), ipf.filetable_offset());
        println!("{:<15}: {}", "Unknown".bold(), ipf.unknown());
        println!("{:<15}: {}", "Footer".bold(), ipf.filefooter_offset());
        println!("{:<15}: {}", "Format".bold(), format);
        println!("{:<15}: {}", "Base revision".bold(), ipf.base_revision());
        println!("{:<15}: {}", "Revision".bold(), ipf.revision());

        Ok(())
    }
}
