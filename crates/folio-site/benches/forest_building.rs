//! Benchmarks for page tree building and search.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use folio_site::{ForestBuilder, Workspace, build_forest};
use folio_storage::{JsonFile, Page, PageId, PageMap};

/// Create a page collection with specified depth and breadth.
fn create_pages(depth: usize, breadth: usize) -> PageMap {
    fn create_level(
        pages: &mut PageMap,
        id: String,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) {
        let children: Vec<String> = if current_depth < max_depth {
            (0..breadth).map(|i| format!("{id}-{i}")).collect()
        } else {
            Vec::new()
        };
        pages.insert(
            PageId::from(id.clone()),
            Page::new(format!("Page {id}"))
                .with_content(format!("Content at depth {current_depth}."))
                .with_children(children.clone()),
        );
        for child in children {
            create_level(pages, child, current_depth + 1, max_depth, breadth);
        }
    }

    let mut pages = PageMap::new();
    create_level(&mut pages, "root".to_owned(), 0, depth, breadth);
    pages
}

fn bench_forest_by_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_by_shape");

    for (depth, breadth) in [(3, 5), (5, 3), (8, 2)] {
        let pages = create_pages(depth, breadth);
        group.throughput(Throughput::Elements(pages.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("build", format!("d{depth}_b{breadth}")),
            &pages,
            |b, pages| b.iter(|| build_forest(pages)),
        );
    }

    group.finish();
}

fn bench_forest_deep_chain(c: &mut Criterion) {
    let pages = create_pages(1000, 1);

    c.bench_function("forest_deep_chain", |b| {
        b.iter(|| ForestBuilder::new(&pages).max_depth(4096).build());
    });
}

fn bench_search(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let repo = JsonFile::new(temp_dir.path().join("pages.json"));
    folio_storage::Repository::save(&repo, &create_pages(4, 4)).unwrap();
    let workspace = Workspace::open(std::sync::Arc::new(repo)).unwrap();

    let mut group = c.benchmark_group("search");

    group.bench_function("search_hit", |b| b.iter(|| workspace.search("depth 3")));
    group.bench_function("search_miss", |b| b.iter(|| workspace.search("nothing here")));

    group.finish();
}

criterion_group!(
    benches,
    bench_forest_by_shape,
    bench_forest_deep_chain,
    bench_search
);
criterion_main!(benches);
