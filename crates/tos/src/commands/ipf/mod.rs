pub mod extract;
pub mod list;
pub mod meta;

#[derive(clap::Subcommand)]
pub enum IpfCommands {
    /// List the entries of an IPF archive
    List(list::ListArgs),
    /// Show the footer metadata of an IPF archive
    Meta(meta::MetaArgs),
    /// Extract an IPF archive into a directory
    Extract(extract::ExtractArgs),
}

impl IpfCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            IpfCommands::List(list) => list.handle(),
            IpfCommands::Meta(meta) => meta.handle(),
            IpfCommands::Extract(extract) => extract.handle(),
        }
    }
}
