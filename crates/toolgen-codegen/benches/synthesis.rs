//! Performance benchmarks for extraction and synthesis.
//!
//! Measures, for documents of 1 to 500 command sections:
//! - Segmenting and decoding the command document
//! - Rendering the server module in lookup and embed mode
//!
//! Run with: cargo bench --package toolgen-codegen

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;
use toolgen_codegen::{SynthesisOptions, Synthesizer};
use toolgen_core::GenerationMode;
use toolgen_extract::Extractor;

// ============================================================================
// Test Data Generators
// ============================================================================

/// Builds a command document with `count` sections of moderate size.
fn create_document(count: usize) -> String {
    let mut text = String::from("# Bench Commands\n\n## Installation\n\nCopy the files.\n\n");

    for index in 0..count {
        let _ = write!(
            text,
            "## /flow-bench-{index}\n\n\
             **File**: `flow-bench-{index}.md`\n\n\
             <!-- MCP_METADATA\n\
             category: bench\n\
             plan_operations: [READ, WRITE]\n\
             parameters:\n  \
               - name: title\n    type: str\n    required: true\n    description: Title\n  \
               - name: priority\n    type: int\n    required: false\n    default: 3\n    description: Priority\n\
             MCP_METADATA_END -->\n\n\
             ```markdown\n\
             ---\ndescription: Benchmark command {index}\n---\n\n\
             Read the plan, update task {index} and report progress to the user.\n\n\
             ```bash\necho {index}\n```\n\
             ```\n\n"
        );
    }

    text
}

// ============================================================================
// Benchmark Functions
// ============================================================================

/// Benchmarks segmentation and metadata decoding.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for count in [1, 10, 100, 500] {
        let text = create_document(count);
        let extractor = Extractor::default();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| {
                let document = extractor.parse(black_box(text));
                let extraction = extractor.extract(&document);
                assert_eq!(extraction.records.len(), count);
            });
        });
    }

    group.finish();
}

/// Benchmarks module rendering in both generation modes.
fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    for mode in [GenerationMode::Lookup, GenerationMode::Embed] {
        let synthesizer = Synthesizer::new(SynthesisOptions {
            mode,
            ..SynthesisOptions::default()
        })
        .expect("Synthesizer should initialize");

        for count in [1, 10, 100, 500] {
            let extractor = Extractor::default();
            let document = extractor.parse(&create_document(count));
            let records = extractor.extract(&document).records;

            group.throughput(Throughput::Elements(count as u64));
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), count),
                &records,
                |b, records| {
                    b.iter(|| {
                        let artifact = synthesizer.synthesize(black_box(records), &document);
                        assert!(artifact.is_ok());
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_synthesis);
criterion_main!(benches);
