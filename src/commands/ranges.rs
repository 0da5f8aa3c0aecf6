use anyhow::Result;
use pdftoolkit::PageRangeSpec;

pub fn run(pages: &str) -> Result<()> {
    let spec = PageRangeSpec::parse(pages)?;

    println!("{}", spec);
    for range in spec.intervals() {
        println!("  {} -> {}", range, range.len());
    }
    println!("{} page(s) requested", spec.page_count());

    Ok(())
}
