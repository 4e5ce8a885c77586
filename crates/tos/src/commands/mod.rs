pub mod ies;
pub mod ipf;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle IES data tables
    Ies {
        #[command(subcommand)]
        command: ies::IesCommands,
    },
    /// Handle IPF archives
    Ipf {
        #[command(subcommand)]
        command: ipf::IpfCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Ies { command } => command.handle(),
            Commands::Ipf { command } => command.handle(),
        }
    }
}
