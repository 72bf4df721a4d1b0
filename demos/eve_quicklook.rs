use anyhow::Result;
use lasp_eve::{Dispatcher, Fetcher, QueryAttr};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Example program that calls the library API.
    // Pass `--fetch` to download the files; the target directory comes from
    // EVE_DATA_DIR or a `.everc` file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let query = vec![
        QueryAttr::time("2016/1/1", "2016/1/3")?,
        QueryAttr::instrument("EVE"),
        QueryAttr::level(0),
    ];

    let results = Dispatcher::new().search(&query)?;
    println!("{}", results);

    if std::env::args().any(|a| a == "--fetch") {
        for file in Fetcher::from_env()?.fetch(&results)? {
            println!("{} ({} bytes)", file.path.display(), file.bytes);
        }
    } else {
        println!("{}", results.to_json()?);
    }
    Ok(())
}
