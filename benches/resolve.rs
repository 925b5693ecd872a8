//! Benchmarks for page-context resolution.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use page_sentinel::dom::PageDocument;
use page_sentinel::resolver::Resolver;

fn shopping_page() -> String {
    let mut html = String::from("<html><body><div class=\"countdown\">04:59</div>");
    for i in 0..200 {
        html.push_str(&format!(
            "<div class=\"product\"><h2>Item {i}</h2><span>$ {i}.99</span>\
             <select name=\"quantity\"><option>1</option></select>\
             <button>Add to Cart</button><p>Hurry, only 3 left!</p></div>"
        ));
    }
    html.push_str("<form action=\"https://pay.example/checkout\"></form></body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let html = shopping_page();
    c.bench_function("parse_shopping_200", |bench| {
        bench.iter(|| {
            black_box(PageDocument::parse("https://www.amazon.com/products/deals", &html).unwrap())
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let html = shopping_page();
    let resolver = Resolver::default();

    c.bench_function("parse_and_resolve_shopping_200", |bench| {
        bench.iter(|| {
            let page = PageDocument::parse("https://www.amazon.com/products/deals", &html).unwrap();
            black_box(resolver.resolve(&page))
        })
    });
}

criterion_group!(benches, bench_parse, bench_resolve);
criterion_main!(benches);
