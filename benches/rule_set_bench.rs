use canvas_rules::canvas::title_component;
use canvas_rules::validation::{
    Logical, Operator, ParameterValidator, Rule, RuleContext, RuleSet,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn nested_rule_set(context: &RuleContext, depth: usize, width: usize) -> RuleSet {
    let title = title_component();
    let mut set = RuleSet::new(context, &title, "title_x").expect("known attribute");
    if depth % 2 == 1 {
        set.set_logical(Logical::Any);
    }
    for index in 0..width {
        if depth > 0 && index == 0 {
            set.add(nested_rule_set(context, depth - 1, width));
            continue;
        }
        let rule = Rule::new(context, &title, "title_x")
            .expect("known attribute")
            .with_a("title_x")
            .with_b("title_y")
            .with_operator(Operator::IsGreaterOrEqual);
        set.add(rule);
    }
    set
}

fn bench_nested_rule_set_check(c: &mut Criterion) {
    let context = RuleContext::default();
    let title = title_component();
    let set = nested_rule_set(&context, 4, 16);

    c.bench_function("nested_rule_set_check_depth4_width16", |b| {
        b.iter(|| {
            let report = set.check(black_box(&title)).expect("configured set");
            black_box(report.is_valid());
        })
    });
}

fn bench_title_parameter_checks(c: &mut Criterion) {
    let title = title_component();
    let validator = ParameterValidator::new();

    c.bench_function("title_parameter_checks", |b| {
        b.iter(|| {
            let report = validator
                .validate_all(black_box(&title))
                .expect("valid patterns");
            black_box(report.is_valid());
        })
    });
}

criterion_group!(
    benches,
    bench_nested_rule_set_check,
    bench_title_parameter_checks
);
criterion_main!(benches);
