//! Probe outcomes reach the metrics recorder.

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::MetricKind;
use net_connectivity::observability::metrics::{PROBES_TOTAL, PROBE_DURATION_SECONDS};
use net_connectivity::{NetworkStatus, Prober};

mod common;

fn label<'a>(labels: &'a [(String, String)], name: &str) -> Option<&'a str> {
    labels
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_report_records_counter_and_histogram() {
    let stub = common::start_stub("200 OK", &[]);
    let refused = common::refused_addr();
    let prober = Prober::new(common::config_for(&[
        ("stub", stub.url()),
        ("dead", format!("http://{}/", refused)),
    ]))
    .unwrap();

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let (first, second) = metrics::with_local_recorder(&recorder, || {
        (prober.network_status(), prober.network_status())
    });
    assert_eq!(first, NetworkStatus::Connected);
    assert_eq!(second, NetworkStatus::Disconnected);

    let mut counters = Vec::new();
    let mut histograms = Vec::new();
    for (key, _, _, value) in snapshotter.snapshot().into_vec() {
        let labels: Vec<(String, String)> = key
            .key()
            .labels()
            .map(|l| (l.key().to_string(), l.value().to_string()))
            .collect();
        match (key.kind(), value) {
            (MetricKind::Counter, DebugValue::Counter(count)) => {
                assert_eq!(key.key().name(), PROBES_TOTAL);
                counters.push((labels, count));
            }
            (MetricKind::Histogram, DebugValue::Histogram(samples)) => {
                assert_eq!(key.key().name(), PROBE_DURATION_SECONDS);
                histograms.push((labels, samples.len()));
            }
            (kind, value) => panic!("unexpected metric {:?} {:?}", kind, value),
        }
    }

    assert_eq!(counters.len(), 2);
    for (labels, count) in &counters {
        assert_eq!(*count, 1);
        let expected = match label(labels, "server") {
            Some("stub") => "connected",
            Some("dead") => "disconnected",
            other => panic!("unexpected server label {:?}", other),
        };
        assert_eq!(label(labels, "status"), Some(expected));
    }

    assert_eq!(histograms.len(), 2);
    for (labels, samples) in &histograms {
        assert_eq!(*samples, 1);
        assert!(matches!(label(labels, "server"), Some("stub") | Some("dead")));
        assert_eq!(label(labels, "status"), None);
    }
}
