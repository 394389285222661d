use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use lvdiff::snapshot::classic;

pub fn exec(store: PathBuf, json: bool) -> Result<()> {
    let mut f =
        File::open(&store).with_context(|| format!("open exception store {}", store.display()))?;
    let ranges = classic::scan_store(&mut f)
        .with_context(|| format!("scan exception store {}", store.display()))?;

    if json {
        println!("{}", serde_json::to_string(&ranges)?);
    } else {
        for r in &ranges {
            println!("{}..{}", r.first_byte, r.last_byte);
        }
    }
    Ok(())
}
