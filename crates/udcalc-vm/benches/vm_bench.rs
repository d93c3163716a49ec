use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use udcalc_parser::{parse_expression, ParseOptions};
use udcalc_types::{AngleUnit, CalcMode};
use udcalc_vm::{compile, VM};

// ==============================================================================
// Compile + execute throughput
// ==============================================================================

const SCIENTIFIC: &[(&str, &str)] = &[
    ("arith", "2 + 3 * 4 - 5 / 2"),
    ("power_chain", "2 ^ 3 ^ 2 + 10 ^ -3"),
    ("trig", "sin(π / 6) * cos(π / 3) + tan(0.5)"),
    ("factorial", "10! / (4.5)!"),
];

const PROGRAMMER: &[(&str, &str)] = &[
    ("bitwise", "255 & 15 | 3 xor 1"),
    ("shifts", "1 << 40 >> 3"),
];

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let options = ParseOptions::new(CalcMode::Scientific, AngleUnit::Radians);

    for (name, source) in SCIENTIFIC {
        let tree = parse_expression(source, options).expect("bench expression parses");
        group.bench_function(*name, |b| {
            b.iter(|| compile(black_box(&tree), CalcMode::Scientific.domain()))
        });
    }

    group.finish();
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");
    let mut vm = VM::new();

    let cases = SCIENTIFIC
        .iter()
        .map(|case| (case, CalcMode::Scientific))
        .chain(PROGRAMMER.iter().map(|case| (case, CalcMode::Programmer)));

    for ((name, source), mode) in cases {
        let options = ParseOptions::new(mode, AngleUnit::Radians);
        let tree = parse_expression(source, options).expect("bench expression parses");
        let program = compile(&tree, mode.domain()).expect("bench expression compiles");
        group.bench_function(*name, |b| b.iter(|| vm.execute(black_box(&program))));
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_execute);
criterion_main!(benches);
