use criterion::{Criterion, criterion_group, criterion_main};
use searchcrate::filter::conditions::{FieldContext, build_filter_condition};
use searchcrate::FilterExpression;
use std::hint::black_box;

fn bench_parse_filter(c: &mut Criterion) {
    c.bench_function("parse_simple_filter", |b| {
        b.iter(|| FilterExpression::parse(black_box("age-gte-18")));
    });

    c.bench_function("parse_compound_filter", |b| {
        b.iter(|| {
            FilterExpression::parse(black_box(
                "or_age-gt-18,email-contains-john,status-in-active|pending|archived",
            ))
        });
    });
}

fn bench_build_condition(c: &mut Criterion) {
    let ctx = FieldContext {
        entity: "users",
        allowed_fields: &["age", "email", "status", "profile"],
        joined_fields: &["trips"],
    };
    let filter = FilterExpression::parse(
        "or_age-gt-18,email-contains-john,profile.level-eq-gold,trips.days-gte-3",
    )
    .unwrap()
    .unwrap();

    c.bench_function("build_filter_condition", |b| {
        b.iter(|| build_filter_condition(black_box(&filter), &ctx));
    });
}

criterion_group!(benches, bench_parse_filter, bench_build_condition);
criterion_main!(benches);
