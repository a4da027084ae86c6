//! Performance benchmarks for the dispatch hot path.
//!
//! - Phone normalization over assorted input formats
//! - Contact extraction and de-duplication over growing beneficiary lists
//! - A full contact loop with instant channels

use animia_sms_dispatch::channels::DeliveryChannel;
use animia_sms_dispatch::domain::NormalizedPhone;
use animia_sms_dispatch::error::ChannelResult;
use animia_sms_dispatch::models::{Beneficiary, ChannelKind};
use animia_sms_dispatch::{BulkOrchestrator, ContactExtractor, PhoneNormalizer, SmartDispatcher};
use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

struct InstantChannel;

#[async_trait]
impl DeliveryChannel for InstantChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::AppIntent
    }

    async fn send(&self, _number: &NormalizedPhone, _message: &str) -> ChannelResult<()> {
        Ok(())
    }
}

fn beneficiaries(count: usize) -> Vec<Beneficiary> {
    (0..count)
        .map(|i| Beneficiary {
            id: i as i64,
            name: Some(format!("Beneficiary {}", i)),
            phone: Some(format!("98765{:05}", i)),
            alt_phone: Some(format!("+91 98000 {:05}", i % 50)),
            doctor_phone: (i % 3 == 0).then(|| "080-2222-3333".to_string()),
            ..Default::default()
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = PhoneNormalizer::default();
    let inputs = [
        "9876543210",
        "+91 98765 43210",
        "(987) 654-3210",
        "+44 20 7946 0958",
        "12345",
    ];

    c.bench_function("normalize_mixed_formats", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(normalizer.normalize(black_box(input)));
            }
        });
    });

    c.bench_function("parse_mixed_formats", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = black_box(normalizer.parse(black_box(input)));
            }
        });
    });
}

fn bench_extraction(c: &mut Criterion) {
    let extractor = ContactExtractor::default();
    let mut group = c.benchmark_group("extract_unique_numbers");

    for size in [10, 100, 1000] {
        let list = beneficiaries(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &list, |b, list| {
            b.iter(|| black_box(extractor.extract_unique_numbers(list)));
        });
    }

    group.finish();
}

fn bench_contact_loop(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let dispatcher = SmartDispatcher::new(Arc::new(InstantChannel));
    let orchestrator = BulkOrchestrator::new(Arc::new(dispatcher), ContactExtractor::default())
        .with_inter_send_delay(Duration::ZERO);
    let list = beneficiaries(50);

    c.bench_function("send_to_beneficiaries_50", |b| {
        b.to_async(&rt).iter(|| async {
            black_box(
                orchestrator
                    .send_to_beneficiaries(&list, "Hb test at the PHC on Friday", false)
                    .await,
            );
        });
    });
}

criterion_group!(benches, bench_normalize, bench_extraction, bench_contact_loop);
criterion_main!(benches);
