use anyhow::{Context, Result};
use carrier_quality::{
    pipeline,
    table::{read_table, write::write_csv_to, write_summary, write_table, RawTable},
    Variant,
};
use clap::{Parser, ValueEnum};
use std::{io, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    /// "Data Quality by Carrier" base file + RCA mapping file
    CarrierQuality,
    /// Truckload shipment export (no mapping file)
    ShipmentExport,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::CarrierQuality => Variant::CARRIER_QUALITY,
            VariantArg::ShipmentExport => Variant::SHIPMENT_EXPORT,
        }
    }
}

/// Enrich a carrier shipment quality export into the fixed report layout.
#[derive(Parser, Debug)]
#[command(name = "carrier-quality", version)]
struct Args {
    /// Shape of the base file
    #[arg(long, value_enum, default_value = "carrier-quality")]
    variant: VariantArg,

    /// Base shipment table (.csv or .json)
    #[arg(long, short)]
    input: PathBuf,

    /// RCA mapping table (.csv or .json); required for carrier-quality
    #[arg(long, short)]
    mapping: Option<PathBuf>,

    /// Output table (.csv or .parquet)
    #[arg(long, short)]
    output: PathBuf,

    /// Also write the quick-check counters as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the first N output rows to stdout as CSV
    #[arg(long, default_value_t = 0)]
    preview: usize,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,carrier_quality=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let variant: Variant = args.variant.into();
    info!(%variant, input = %args.input.display(), "startup");

    // ─── 2) load inputs ──────────────────────────────────────────────
    let base = read_table(&args.input)?;
    let mapping = args.mapping.as_ref().map(read_table).transpose()?;

    // ─── 3) enrich ───────────────────────────────────────────────────
    let report = pipeline::run(&variant, base, mapping.as_ref())
        .with_context(|| format!("processing {}", args.input.display()))?;

    // ─── 4) write outputs ────────────────────────────────────────────
    write_table(&report.output, &args.output)?;
    if let Some(path) = &args.summary {
        write_summary(&report.summary, path)?;
        info!(path = %path.display(), "wrote summary");
    }

    if args.preview > 0 {
        let head = RawTable {
            headers: report.output.headers.clone(),
            rows: report.output.rows.iter().take(args.preview).cloned().collect(),
        };
        write_csv_to(&head, io::stdout().lock())?;
    }

    print!("{}", report.summary);
    info!(output = %args.output.display(), "all done");
    Ok(())
}
