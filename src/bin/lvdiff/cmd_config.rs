use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use lvdiff::VolumeGroupConfig;

pub fn exec(config: PathBuf, vg_name: String, json: bool) -> Result<()> {
    let text = fs::read_to_string(&config)
        .with_context(|| format!("read config dump {}", config.display()))?;
    let vg = VolumeGroupConfig::load(&vg_name, &text)?;

    if json {
        let lvs: Vec<_> = vg
            .logical_volumes()
            .values()
            .map(|lv| {
                json!({
                    "name": lv.name(),
                    "thin": lv.thin(),
                    "snapshot": lv.snapshot(&vg),
                    "origin": lv.resolve_origin(&vg),
                    "thin_pool": lv.thin_pool(),
                    "device_id": lv.device_id(),
                    "chunk_size": lv.chunk_size(),
                })
            })
            .collect();
        let obj = json!({
            "vg": vg.name(),
            "version": vg.version(),
            "description": vg.description(),
            "uuid": vg.uuid(),
            "physical_volumes": vg.physical_volumes().keys().collect::<Vec<_>>(),
            "logical_volumes": lvs,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }

    println!("vg:          {}", vg.name());
    println!("version:     {}", fmt_opt(vg.version()));
    println!("description: {}", fmt_opt(vg.description()));
    println!("uuid:        {}", fmt_opt(vg.uuid()));
    println!("pvs:         {}", vg.physical_volumes().len());
    for lv in vg.logical_volumes().values() {
        let kind = match (lv.thin(), lv.snapshot(&vg)) {
            (true, true) => "thin snapshot",
            (true, false) => "thin",
            (false, true) => "snapshot",
            (false, false) => "volume",
        };
        match lv.resolve_origin(&vg) {
            Some(origin) => println!("lv {:<16} {} of {}", lv.name(), kind, origin),
            None => println!("lv {:<16} {}", lv.name(), kind),
        }
    }
    Ok(())
}

fn fmt_opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
