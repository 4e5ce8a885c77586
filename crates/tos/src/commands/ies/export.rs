use clap::{Args, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tos_ies::IesTable;
use tracing::info;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    #[default]
    Csv,
    Json,
}

#[derive(Args)]
pub struct ExportArgs {
    /// An input IES table
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target file
    #[arg(short, long, value_name = "OUT")]
    output: PathBuf,

    /// The output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

impl ExportArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let table = IesTable::new(f)?;

        info!(
            "exporting {} rows to {}",
            table.len(),
            self.output.display()
        );

        match self.format {
            Format::Csv => self.write_csv(&table),
            Format::Json => self.write_json(&table),
        }
    }

    fn write_csv(&self, table: &IesTable) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.output)
            .into_diagnostic()
            .context(format!("creating {}", &self.output.display()))?;

        writer
            .write_record(table.columns().iter().map(|c| c.name.as_str()))
            .into_diagnostic()?;
        for row in table.rows() {
            writer
                .write_record(row.iter().map(|v| v.to_string()))
                .into_diagnostic()?;
        }
        writer.flush().into_diagnostic()?;

        Ok(())
    }

    fn write_json(&self, table: &IesTable) -> Result<()> {
        let out = File::create(&self.output)
            .into_diagnostic()
            .context(format!("creating {}", &self.output.display()))?;

        let document = serde_json::json!({
            "table": table.name(),
            "columns": table.columns(),
            "rows": table.rows(),
        });
        serde_json::to_writer_pretty(out, &document).into_diagnostic()?;

        Ok(())
    }
}
