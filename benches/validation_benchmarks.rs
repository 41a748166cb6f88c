use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use manifest_lint::{parse_document, validate};

/// Generate a manifest with `containers` entries for a validation scenario
fn generate_manifest(containers: usize, scenario: &str) -> String {
    let mut content = String::from("apiVersion: v1\nkind: Pod\nmetadata:\n  name: bench\nspec:\n  os: linux\n  containers:\n");

    for i in 0..containers {
        let (name, image, port, cpu, memory) = match scenario {
            "all_valid" => (
                format!("worker_{}", i),
                format!("registry.bigbrother.io/worker:{}.0", i),
                8000 + (i % 1000) as i64,
                "2".to_string(),
                "512Mi".to_string(),
            ),
            "mixed_errors" => match i % 5 {
                0 => (format!("Worker{}", i), "nginx".to_string(), 80, "1".to_string(), "1Gi".to_string()),
                1 => (format!("worker_{}", i), "registry.bigbrother.io/w:1".to_string(), 70000, "1".to_string(), "1Gi".to_string()),
                2 => (format!("worker_{}", i), "registry.bigbrother.io/w:1".to_string(), 80, "\"2.5\"".to_string(), "1Gi".to_string()),
                3 => (format!("worker_{}", i), "registry.bigbrother.io/w:1".to_string(), 80, "1".to_string(), "1GB".to_string()),
                _ => (format!("worker_{}", i), "registry.bigbrother.io/w:1".to_string(), 80, "1".to_string(), "1Gi".to_string()),
            },
            _ => unreachable!(),
        };

        content.push_str(&format!(
            "    - name: {}\n      image: {}\n      ports:\n        - containerPort: {}\n          protocol: TCP\n      resources:\n        limits:\n          cpu: {}\n          memory: {}\n",
            name, image, port, cpu, memory
        ));
    }

    content
}

fn bench_validation_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation_scenarios");

    for scenario in ["all_valid", "mixed_errors"] {
        for containers in [10, 100, 1000] {
            let text = generate_manifest(containers, scenario);
            let doc = parse_document(&text).expect("benchmark manifest parses");

            group.throughput(Throughput::Elements(containers as u64));
            group.bench_with_input(
                BenchmarkId::new(scenario, containers),
                &doc,
                |b, doc| b.iter(|| validate(black_box(doc))),
            );
        }
    }

    group.finish();
}

fn bench_parse_and_validate(c: &mut Criterion) {
    let text = generate_manifest(100, "mixed_errors");

    c.bench_function("parse_and_validate_100", |b| {
        b.iter(|| {
            let doc = parse_document(black_box(&text)).expect("benchmark manifest parses");
            validate(&doc)
        })
    });
}

criterion_group!(benches, bench_validation_scenarios, bench_parse_and_validate);
criterion_main!(benches);
