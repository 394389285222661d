use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Snapshot differencing over LVM metadata
#[derive(Parser, Debug)]
#[command(name = "lvdiff", version, about = "Compute changed byte ranges between an LV and its snapshot")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Summarize a volume group from a configuration dump
    Config {
        /// Configuration dump file (vgcfgbackup output)
        #[arg(long)]
        config: PathBuf,
        /// Volume group name
        #[arg(long)]
        vg: String,
        #[arg(long)]
        json: bool,
    },
    /// Scan a classic snapshot's exception store and print changed ranges
    Classic {
        /// Exception-store device or image file (the snapshot's -cow node)
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Diff a thin snapshot against its origin via a pool metadata dump
    Thin {
        /// Configuration dump file (vgcfgbackup output)
        #[arg(long)]
        config: PathBuf,
        /// Volume group name
        #[arg(long)]
        vg: String,
        /// Thin snapshot LV name
        #[arg(long)]
        lv: String,
        /// Pool metadata dump file (thin_dump output)
        #[arg(long)]
        dump: PathBuf,
        #[arg(long)]
        json: bool,
    },
}
