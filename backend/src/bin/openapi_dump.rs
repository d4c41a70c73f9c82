//! Print the back office OpenAPI document as JSON.

use agencia::ApiDoc;
use color_eyre::eyre::{Context, Result};
use utoipa::OpenApi;

#[expect(clippy::print_stdout, reason = "the document is written to stdout")]
fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise the OpenAPI document")?;
    println!("{json}");
    Ok(())
}
