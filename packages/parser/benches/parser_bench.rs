use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_parser::{parse, ImportRegistry};

const SMALL: &str = r#"return <div className="card"><p>Hi</p></div>;"#;

const LARGE: &str = r#"
const products = loadProducts();
const featured = products.filter(p => p.featured);

return (
  <section className="grid">
    <header className="grid-header">
      <h2>Featured</h2>
      <p>Hand-picked items</p>
    </header>
    <ul className="grid-body">
      {featured.map(p => <li key={p.id}>{p.name}</li>)}
    </ul>
    <footer>
      <a href="/catalog">Browse all</a>
      <img src="/placeholder.svg?height=80&width=80" alt="badge" width={80} height={80} />
    </footer>
  </section>
);
"#;

fn bench_parse(c: &mut Criterion) {
    let registry = ImportRegistry::new();

    c.bench_function("parse_small", |b| {
        b.iter(|| parse(black_box(SMALL), &registry).unwrap())
    });

    c.bench_function("parse_large", |b| {
        b.iter(|| parse(black_box(LARGE), &registry).unwrap())
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
