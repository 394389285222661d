use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use lvdiff::snapshot::thin;
use lvdiff::VolumeGroupConfig;

pub fn exec(config: PathBuf, vg: String, lv: String, dump: PathBuf, json: bool) -> Result<()> {
    let text = fs::read_to_string(&config)
        .with_context(|| format!("read config dump {}", config.display()))?;
    let dump_xml = fs::read_to_string(&dump)
        .with_context(|| format!("read pool metadata dump {}", dump.display()))?;

    let vgcfg = VolumeGroupConfig::load(&vg, &text)?;
    let ranges = thin::differences(&vgcfg, &lv, &dump_xml)
        .with_context(|| format!("diff thin snapshot {vg}/{lv}"))?;

    if json {
        println!("{}", serde_json::to_string(&ranges)?);
    } else {
        for r in &ranges {
            println!("{}..{}", r.first_byte, r.last_byte);
        }
    }
    Ok(())
}
