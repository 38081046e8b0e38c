//! Benchmarks for cc-promptline
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::io::Write;
use std::process::{Command, Stdio};

use cc_promptline::git::{GitState, parse_numstat, parse_status};
use cc_promptline::input::SessionInput;
use cc_promptline::platform::EMOJI_ICONS;
use cc_promptline::render::{context_percent, git_fragment, render_bar, status_line};

const FULL_JSON: &str = r#"{
    "model": {"display_name": "Claude Opus 4.5"},
    "workspace": {"current_dir": "/Users/test/project/src/components"},
    "context_window": {
        "context_window_size": 200000,
        "current_usage": {
            "input_tokens": 50000,
            "cache_creation_input_tokens": 10000,
            "cache_read_input_tokens": 5000
        }
    },
    "cost": {
        "total_cost_usd": 0.15,
        "total_lines_added": 156,
        "total_lines_removed": 23
    }
}"#;

/// Benchmark the full binary startup with minimal JSON input
fn bench_startup_minimal(c: &mut Criterion) {
    let binary = env!("CARGO_BIN_EXE_cc-promptline");

    c.bench_function("startup_minimal", |b| {
        b.iter(|| {
            let mut child = Command::new(binary)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .spawn()
                .expect("failed to spawn");

            child
                .stdin
                .take()
                .unwrap()
                .write_all(b"{}")
                .expect("failed to write");

            let output = child.wait_with_output().expect("failed to wait");
            black_box(output.stdout)
        })
    });
}

/// Benchmark with full JSON input (simulates real Claude Code usage)
fn bench_startup_full_json(c: &mut Criterion) {
    let binary = env!("CARGO_BIN_EXE_cc-promptline");

    c.bench_function("startup_full_json", |b| {
        b.iter(|| {
            let mut child = Command::new(binary)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .spawn()
                .expect("failed to spawn");

            child
                .stdin
                .take()
                .unwrap()
                .write_all(FULL_JSON.as_bytes())
                .expect("failed to write");

            let output = child.wait_with_output().expect("failed to wait");
            black_box(output.stdout)
        })
    });
}

fn bench_parse_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_input");
    group.throughput(Throughput::Bytes(FULL_JSON.len() as u64));

    group.bench_function("minimal", |b| {
        b.iter(|| SessionInput::parse(black_box("{}")).unwrap())
    });

    group.bench_function("full", |b| {
        b.iter(|| SessionInput::parse(black_box(FULL_JSON)).unwrap())
    });

    group.finish();
}

fn bench_parse_status(c: &mut Criterion) {
    let clean = "\
# branch.oid 1234567890abcdef1234567890abcdef12345678
# branch.head main
# branch.upstream origin/main
# branch.ab +2 -1
";
    let dirty: String = {
        let mut s = String::from("# branch.oid abcd\n# branch.head feature/render\n");
        for i in 0..50 {
            s.push_str(&format!(
                "1 .M N... 100644 100644 100644 aaaa bbbb src/file{i}.rs\n"
            ));
        }
        s
    };

    let mut group = c.benchmark_group("parse_status");

    group.bench_function("clean", |b| b.iter(|| parse_status(black_box(clean))));

    group.bench_function("dirty_50_files", |b| {
        b.iter(|| parse_status(black_box(&dirty)))
    });

    group.finish();
}

fn bench_parse_numstat(c: &mut Criterion) {
    let numstat: String = (0..50)
        .map(|i| format!("{}\t{}\tsrc/file{i}.rs\n", i * 3, i))
        .collect();

    c.bench_function("parse_numstat_50_files", |b| {
        b.iter(|| parse_numstat(black_box(&numstat)))
    });
}

fn bench_render_bar(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_bar");
    group.throughput(Throughput::Elements(1));

    group.bench_function("empty", |b| b.iter(|| render_bar(black_box(0))));
    group.bench_function("partial", |b| b.iter(|| render_bar(black_box(32))));
    group.bench_function("overflow", |b| b.iter(|| render_bar(black_box(130))));

    group.finish();
}

fn bench_context_percent(c: &mut Criterion) {
    c.bench_function("context_percent", |b| {
        b.iter(|| context_percent(black_box(65_000), black_box(200_000)))
    });
}

fn bench_git_fragment(c: &mut Criterion) {
    let dirty = GitState::Dirty {
        branch: "feature/render".to_string(),
        files: 5,
        added: 120,
        removed: 34,
        ahead: 2,
        behind: 1,
    };

    c.bench_function("git_fragment_dirty", |b| {
        b.iter(|| git_fragment(&EMOJI_ICONS, black_box(&dirty)))
    });
}

fn bench_status_line(c: &mut Criterion) {
    let input = SessionInput::parse(FULL_JSON).unwrap();
    let state = GitState::Clean {
        branch: "main".to_string(),
        ahead: 0,
        behind: 0,
    };

    c.bench_function("status_line_full", |b| {
        b.iter(|| {
            status_line(
                &EMOJI_ICONS,
                black_box(&input),
                black_box("/Users/test/project/src/components"),
                black_box(&state),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_startup_minimal,
    bench_startup_full_json,
    bench_parse_input,
    bench_parse_status,
    bench_parse_numstat,
    bench_render_bar,
    bench_context_percent,
    bench_git_fragment,
    bench_status_line,
);

criterion_main!(benches);
