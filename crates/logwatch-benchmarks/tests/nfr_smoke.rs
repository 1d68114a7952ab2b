//! Benchmark smoke test for the evidence filter/sort pipeline.

use std::time::Instant;

use logwatch_analysis_contract::{Evidence, Signal};
use logwatch_explorer::{EvidenceFilter, EvidenceSort, filter_evidence, filter_signals, preview};

fn fixture_evidence(count: usize) -> Vec<Evidence> {
    (0..count)
        .map(|index| Evidence {
            title: (index % 7 != 0).then(|| format!("Policy {}", count - index)),
            doc_id: Some(format!("doc-{index}")),
            section: Some(format!("{}.{}", index % 9, index % 4)),
            chunk_id: Some(format!("chunk-{index}")),
            quote: (index % 3 != 0).then(|| "Lock accounts after repeated failures. ".repeat(index % 12)),
            distance: (index % 5 != 0).then(|| ((index * 7919) % 1000) as f64 / 1000.0),
            ..Evidence::default()
        })
        .collect()
}

#[test]
fn benchmark_pipeline_smoke_prints_latency() {
    let evidence = fixture_evidence(5_000);
    let signals: Vec<Signal> = (0..5_000)
        .map(|index| Signal {
            key: Some(format!("signal_{index}")),
            weight: Some((index % 50) as f64),
            reason: Some(format!("burst of {index} failures")),
            ..Signal::default()
        })
        .collect();

    let filters = [
        EvidenceFilter::default(),
        EvidenceFilter {
            query: "policy 4".to_string(),
            only_quoted: true,
            sort: EvidenceSort::Title,
        },
        EvidenceFilter {
            query: "LOCK".to_string(),
            only_quoted: false,
            sort: EvidenceSort::Distance,
        },
    ];

    let start = Instant::now();
    let mut visible = 0usize;

    for _ in 0..20 {
        for filter in &filters {
            let view = filter_evidence(&evidence, filter);
            visible += view.len();
            visible += view
                .iter()
                .take(50)
                .filter_map(|entry| entry.quote.as_deref())
                .map(|quote| preview(quote, 220).chars().count())
                .sum::<usize>();
        }
        visible += filter_signals(&signals, "failures").len();
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_pipeline_elapsed_ms={elapsed_ms}");
    println!("benchmark_visible_total={visible}");

    // This is a lightweight guardrail; strict NFR checks are environment-specific.
    assert!(
        elapsed_ms < 5_000,
        "pipeline smoke benchmark should stay bounded"
    );
}
