//! `sycl-info` without `--impl` - list discovered implementations.

use std::io::Write;

use anyhow::Result;
use sycl_info_matchers::Catalog;

/// Print each implementation as `N. name | version | vendor`.
pub fn run(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    if catalog.is_empty() {
        writeln!(out, "No SYCL implementation(s) available")?;
        return Ok(());
    }

    writeln!(out, "SYCL implementation(s) available:")?;
    writeln!(out)?;
    for (i, descriptor) in catalog.iter().enumerate() {
        writeln!(
            out,
            "{}. {} | {} | {}",
            i + 1,
            descriptor.name,
            descriptor.version,
            descriptor.vendor
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "To select an implementation use command --impl with the index or name of the implementation."
    )?;
    Ok(())
}
