use anyhow::Result;
use kube::Client;
use tracing::info;

use kube_top_reporter::{load_config, sort_records, MetricsCollector, TopPrinter, TopTarget};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!("target = {:?}, namespaces = {:?}", cfg.target, cfg.namespaces);

    let client = Client::try_default().await?;
    let collector = MetricsCollector::new(&client);

    // Check metrics API availability early (fail fast if requested)
    if cfg.fail_if_no_metrics {
        collector.ensure_metrics_available().await?;
    }

    let mut printer = TopPrinter::new(std::io::stdout());

    match cfg.target {
        TopTarget::Nodes => {
            let mut records = collector.collect_node_records().await?;
            if let Some(field) = cfg.sort_by {
                sort_records(&mut records, field);
            }
            info!("Printing {} nodes", records.len());
            printer.print_node_metrics(&records)?;
        }
        TopTarget::Pods => {
            let mut records = collector.collect_pod_records(&cfg.namespaces).await?;
            if let Some(field) = cfg.sort_by {
                sort_records(&mut records, field);
            }
            info!("Printing {} pods", records.len());
            printer.print_pod_metrics(&records, cfg.print_containers)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
