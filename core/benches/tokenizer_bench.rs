use cosearch_core::tokenizer::tokenize;
use criterion::{criterion_group, criterion_main, Criterion};

const PARAGRAPH: &str = "The storm system moved up the eastern seaboard \
overnight, dropping heavy rain on Philadelphia and New York before losing \
strength over New England. Forecasters said the hurricane season had been \
unusually active, with officials urging residents to review evacuation \
plans and stock emergency supplies well before landfall. ";

fn bench_tokenize(c: &mut Criterion) {
    let text = PARAGRAPH.repeat(100);
    c.bench_function("tokenize_news_text", |b| b.iter(|| tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
