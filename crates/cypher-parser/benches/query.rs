use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::ops::ControlFlow;

const QUERY: &str = "MATCH (n:Person {name: 'Alice'})-[:KNOWS*1..2]->(friend) \
     WHERE friend.age > 21 \
     RETURN friend.name AS name, count(*) AS friends \
     ORDER BY name DESC LIMIT 10;";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_query", move |b| {
        b.iter(|| {
            let result = cypher_parser::Parser::new(black_box(QUERY))
                .parse()
                .expect("benchmark query parses");
            black_box(result);
        })
    });
}

fn bench_quick_parse(c: &mut Criterion) {
    c.bench_function("quick_parse_query", move |b| {
        b.iter(|| {
            cypher_parser::QuickParser::new(black_box(QUERY))
                .parse_each(|segment| {
                    black_box(segment.text());
                    ControlFlow::Continue(())
                })
                .expect("benchmark query scans");
        })
    });
}

criterion_group!(benches, bench_parse, bench_quick_parse);
criterion_main!(benches);
