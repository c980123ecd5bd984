//! Dispatch and XML benchmarks
//!
//! Covers reflective feature access, factory creation and a read/write
//! cycle of a small filter document.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fes20::registry::ids::{binary_comparison_op_type, classifier};
use fes20::{fes20, xml, Fes20Factory, ModelObject};
use std::hint::black_box;

const FILTER: &str = r#"<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
  <fes:And>
    <fes:PropertyIsEqualTo matchCase="false">
      <fes:ValueReference>name</fes:ValueReference>
      <fes:Literal>Main St</fes:Literal>
    </fes:PropertyIsEqualTo>
    <fes:PropertyIsBetween>
      <fes:ValueReference>depth</fes:ValueReference>
      <fes:LowerBoundary><fes:Literal>100</fes:Literal></fes:LowerBoundary>
      <fes:UpperBoundary><fes:Literal>200</fes:Literal></fes:UpperBoundary>
    </fes:PropertyIsBetween>
    <fes:ResourceId rid="road.1" version="LAST"/>
  </fes:And>
</fes:Filter>"#;

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let factory = Fes20Factory::new(fes20().unwrap());
    let object = factory.create(classifier::BINARY_COMPARISON_OP_TYPE).unwrap();

    for (name, feature) in [
        ("expression_group", binary_comparison_op_type::EXPRESSION_GROUP),
        ("expression", binary_comparison_op_type::EXPRESSION),
        ("match_case", binary_comparison_op_type::MATCH_CASE),
    ] {
        group.bench_with_input(BenchmarkId::new("get_feature", name), &feature, |b, feature| {
            b.iter(|| black_box(object.get_feature(black_box(*feature), true, true)))
        });
    }

    group.bench_function("create_all", |b| {
        b.iter(|| {
            for class in factory.registry().classes().filter(|c| !c.is_abstract) {
                black_box(factory.create(class.id).ok());
            }
        })
    });

    group.finish();
}

fn bench_xml(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml");
    group.throughput(Throughput::Bytes(FILTER.len() as u64));

    group.bench_function("read", |b| b.iter(|| black_box(xml::from_str(black_box(FILTER)))));

    let document = xml::from_str(FILTER).unwrap();
    group.bench_function("write", |b| b.iter(|| black_box(xml::to_string(black_box(&document)))));

    group.finish();
}

criterion_group!(dispatch_benchmarks, bench_dispatch, bench_xml);

criterion_main!(dispatch_benchmarks);
