pub mod export;
pub mod print;

#[derive(clap::Subcommand)]
pub enum IesCommands {
    /// Print the columns and rows of an IES table
    Print(print::PrintArgs),
    /// Export an IES table to CSV or JSON
    Export(export::ExportArgs),
}

impl IesCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            IesCommands::Print(print) => print.handle(),
            IesCommands::Export(export) => export.handle(),
        }
    }
}
