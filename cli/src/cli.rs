use addon_packer_base::result::{Context, PackerResult};
use addon_packer_logic::runner::AddonPackerRunner;
use addon_packer_real_adapter::RealAdapter;
use std::env::current_dir;
use tracing::{Subscriber, info};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

pub fn run_cli() -> PackerResult<()> {
    if let Err(err) = enable_ansi_support::enable_ansi_support() {
        eprintln!("Failed to enable ANSI support: {err}");
    }

    // stdout is reserved for the packing progress and summary
    let registry = tracing_subscriber::registry().with(log_layer(std::io::stderr));

    tracing::subscriber::set_global_default(registry)
        .context("setting default logging subscriber failed")?;
    let working_directory = current_dir().with_context(|| "Failed to get working directory")?;
    info!("Packing in working directory: '{:?}'", working_directory);
    let adapter = RealAdapter::new(working_directory);
    let runner = AddonPackerRunner::new(adapter);
    runner.run();
    Ok(())
}

fn log_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_span_events(FmtSpan::ENTER)
        .with_filter(tracing_subscriber::filter::LevelFilter::INFO)
}
