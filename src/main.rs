use anyhow::Result;
use msdf_tileset::cli;

fn main() -> Result<()> {
    let result = cli::process_cli();

    if let Err(ref e) = result {
        log::error!("{e:#}");
        eprintln!("msdf-tileset: error: {e:#}");
    }
    // Return the original error so main exits with code 1 (anyhow default)
    result
}
