//! Run with:
//!   cargo bench --bench dispatch

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lambda::{
    Function, Proto, Record, Signature, Value, partial, pepper, prototype, record,
};

/// A chain `depth` levels deep whose root defines `describe`, calling the
/// `name` method overridden by the leaf.
fn deep_chain(depth: usize) -> Proto {
    let mut object = prototype(record([
        (
            "describe",
            Value::from(Function::nullary("describe", |frame| {
                frame.send("name", &[])
            })),
        ),
        (
            "name",
            Value::from(Function::nullary("name", |_| Ok(Value::from("root")))),
        ),
    ]));
    for level in 0..depth {
        object = object.extend(record([("level", Value::from(level as i64))]));
    }
    object.extend(record([(
        "name",
        Value::from(Function::nullary("name", |_| Ok(Value::from("leaf")))),
    )]))
}

fn sum4() -> Function {
    Function::native(
        "sum4",
        Signature::new()
            .required("a")
            .required("b")
            .required("c")
            .optional("d", 0),
        |frame| {
            let total = frame
                .args()
                .iter()
                .filter_map(Value::as_int)
                .sum::<i64>();
            Ok(Value::from(total))
        },
    )
}

fn bench_send(c: &mut Criterion) {
    let shallow = deep_chain(0);
    let deep = deep_chain(32);

    c.bench_function("send: depth 1", |b| {
        b.iter(|| black_box(shallow.send("describe", &[]).unwrap()))
    });
    c.bench_function("send: depth 33", |b| {
        b.iter(|| black_box(deep.send("describe", &[]).unwrap()))
    });
}

fn bench_partial(c: &mut Criterion) {
    let direct = sum4();
    let bound = partial(sum4(), [(0, Value::from(1)), (2, Value::from(3))]);
    let chained = partial(partial(sum4(), [(0, Value::from(1))]), [(2, Value::from(3))]);
    let args = [Value::from(2)];

    c.bench_function("call: direct", |b| {
        b.iter(|| {
            black_box(
                direct
                    .call(&[Value::from(1), Value::from(2), Value::from(3)])
                    .unwrap(),
            )
        })
    });
    c.bench_function("call: partial", |b| {
        b.iter(|| black_box(bound.call(black_box(&args)).unwrap()))
    });
    c.bench_function("call: chained partial", |b| {
        b.iter(|| black_box(chained.call(black_box(&args)).unwrap()))
    });
}

fn bench_pepper(c: &mut Criterion) {
    let adapter = pepper(sum4(), Vec::<(&str, Value)>::new());
    let arguments: Record = record([
        ("c", Value::from(3)),
        ("a", Value::from(1)),
        ("b", Value::from(2)),
    ]);
    let args = [Value::from(arguments)];

    c.bench_function("call: pepper", |b| {
        b.iter(|| black_box(adapter.call(black_box(&args)).unwrap()))
    });
}

criterion_group!(benches, bench_send, bench_partial, bench_pepper);
criterion_main!(benches);
