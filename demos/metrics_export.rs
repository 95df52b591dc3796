use std::io;

use appcache::AppCache;
use appcache::metrics::{MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter};

fn main() -> Result<(), appcache::CacheError> {
    let cache: AppCache<u64> = AppCache::try_new(4)?;
    for i in 0..10u64 {
        cache.add_or_update(format!("k{}", i % 6), i)?;
        let _ = cache.try_get_value(&format!("k{}", i % 3));
    }

    let snapshot = cache.snapshot();
    println!("# hit rate {:.2}", snapshot.hit_rate());

    let exporter = PrometheusTextExporter::new("appcache", io::stdout());
    exporter.export(&snapshot);
    Ok(())
}
