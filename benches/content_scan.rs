use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{
    distributions::{Alphanumeric, DistString},
    seq::SliceRandom,
    thread_rng, Rng,
};
use wpdl_common::{ImageDescriptor, ImageOrigin, SiteUrl};
use wpdl_core::{dedupe, naming::FilenameRegistry};
use wpdl_extractors::content::{BlockExtractor, InlineExtractor, PostContext};

const EXTENSIONS: [&str; 5] = ["jpg", "png", "webp", "gif", "jpeg"];

const PARAGRAPHS: [&str; 4] = [
    "<p>Lorem ipsum dolor sit amet, consectetur adipiscing elit.</p>",
    "<p>Sed do <strong>eiusmod</strong> tempor incididunt ut labore.</p>",
    "<blockquote>Ut enim ad minim veniam, quis nostrud.</blockquote>",
    "<ul><li>one</li><li>two</li><li>three</li></ul>",
];

fn random_image_path(rng: &mut impl Rng) -> String {
    let stem = Alphanumeric.sample_string(rng, 12);
    let ext = EXTENSIONS.choose(rng).unwrap_or(&"jpg");
    format!("/wp-content/uploads/2024/05/{stem}.{ext}")
}

/// Builds a post body with `images` references mixed between inline tags and blocks.
fn seed_content(images: usize) -> String {
    let mut rng = thread_rng();
    let mut html = String::new();

    for i in 0..images {
        html.push_str(PARAGRAPHS.choose(&mut rng).unwrap_or(&PARAGRAPHS[0]));
        let path = random_image_path(&mut rng);

        if i % 2 == 0 {
            html.push_str(&format!(
                r#"<figure><img src="{path}" alt="picture {i}" class="size-large wp-image-{i}"></figure>"#
            ));
        } else {
            let escaped = format!("https:\\/\\/example.com{}", path.replace('/', "\\/"));
            html.push_str(&format!(
                r#"<!-- wp:image {{"id":{i},"url":"{escaped}"}} --><!-- /wp:image -->"#
            ));
        }
    }

    html
}

fn seed_descriptors(num: usize) -> Vec<ImageDescriptor> {
    let mut rng = thread_rng();
    let pool: Vec<String> = (0..num / 2 + 1)
        .map(|_| format!("https://example.com{}", random_image_path(&mut rng)))
        .collect();

    (0..num)
        .map(|i| {
            let url = pool.choose(&mut rng).cloned().unwrap_or_default();
            ImageDescriptor::tagged(url, "Benchmark post", i as u64, ImageOrigin::Inline, None)
        })
        .collect()
}

fn extractor_bench(c: &mut Criterion) {
    let site = SiteUrl::from_input("https://example.com").unwrap();
    let ctx = PostContext {
        site: &site,
        post_title: "Benchmark post",
        post_id: 1,
    };

    for size in [10, 100, 1000] {
        let content = seed_content(size);

        c.bench_function(&format!("Inline scan {size} images"), |b| {
            b.iter(|| InlineExtractor::scan(&ctx, black_box(&content)))
        });
        c.bench_function(&format!("Block scan {size} images"), |b| {
            b.iter(|| BlockExtractor::scan(&ctx, black_box(&content)))
        });
    }
}

fn dedupe_bench(c: &mut Criterion) {
    for size in [100, 1000] {
        c.bench_function(&format!("Dedupe {size} images"), |b| {
            b.iter(|| dedupe(black_box(seed_descriptors(size))))
        });
    }
}

fn naming_bench(c: &mut Criterion) {
    let mut rng = thread_rng();
    let urls: Vec<String> = (0..1000)
        .map(|_| format!("https://example.com{}", random_image_path(&mut rng)))
        .collect();

    c.bench_function("Name 1000 images", |b| {
        b.iter(|| {
            let mut names = FilenameRegistry::new();
            for url in &urls {
                black_box(names.generate(url));
            }
        })
    });
}

criterion_group!(benches, extractor_bench, dedupe_bench, naming_bench);
criterion_main!(benches);
