use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use carryover_hash::LineHasher;
use carryover_tracker::{Input, Tracker};
use carryover_types::{Issue, RuleKey};

/// A synthetic file and one issue on every `spacing`-th line.
fn synthetic(rng: &mut StdRng, lines: usize, spacing: usize) -> (Vec<String>, Vec<Issue>) {
    let content: Vec<String> = (0..lines)
        .map(|_| format!("call{}();", rng.gen_range(0..50)))
        .collect();
    let issues = (1..=lines)
        .step_by(spacing)
        .map(|line| {
            Issue::new(RuleKey::new("java", format!("S{}", line % 7)))
                .with_line(line as u32)
                .with_line_hash(LineHasher::line_hash(&content[line - 1]))
                .with_message("Refactor this call")
        })
        .collect();
    (content, issues)
}

fn bench_shifted_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("track_shifted_file");
    for &lines in &[200usize, 2_000] {
        let mut rng = StdRng::seed_from_u64(42);
        let (base_lines, base_issues) = synthetic(&mut rng, lines, 3);

        // Same file with a header inserted, so every issue moves.
        let mut raw_lines = vec!["// header".to_string(); 10];
        raw_lines.extend(base_lines.iter().cloned());
        let raw_issues: Vec<Issue> = base_issues
            .iter()
            .map(|issue| {
                let mut moved = issue.clone().with_line(issue.line.unwrap_or(1) + 10);
                moved.message = Some("Refactor this call (updated)".into());
                moved
            })
            .collect();

        let base = Input::from_lines(base_issues, &base_lines, 5);
        let raw = Input::from_lines(raw_issues, &raw_lines, 5);
        let tracker = Tracker::new();

        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| {
                let tracking = tracker.track(black_box(&raw), black_box(&base)).unwrap();
                black_box(tracking.matched_count())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shifted_file);
criterion_main!(benches);
