//! Periodic JSON recording of composed frames for offline inspection.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::render::MapFrame;

#[derive(Serialize)]
struct FrameRecord<'a> {
    tick: u64,
    recorded_at: chrono::DateTime<chrono::Local>,
    frame: &'a MapFrame,
}

pub struct FrameLog {
    output_dir: PathBuf,
    interval_ticks: u64,
}

impl FrameLog {
    /// Interval 0 disables recording entirely.
    pub fn new(output_dir: impl AsRef<Path>, interval_ticks: u64) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        if interval_ticks > 0 {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        }
        Ok(Self { output_dir, interval_ticks })
    }

    pub fn disabled() -> Self {
        Self {
            output_dir: PathBuf::new(),
            interval_ticks: 0,
        }
    }

    /// Writes `frame_<tick>.json` when the tick lands on the interval.
    pub fn maybe_write(&mut self, tick: u64, frame: &MapFrame) -> Result<Option<PathBuf>> {
        if self.interval_ticks == 0 || tick == 0 || tick % self.interval_ticks != 0 {
            return Ok(None);
        }
        let record = FrameRecord {
            tick,
            recorded_at: chrono::Local::now(),
            frame,
        };
        let path = self.output_dir.join(format!("frame_{tick:06}.json"));
        let json = serde_json::to_string_pretty(&record)?;
        let mut file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(json.as_bytes())?;
        Ok(Some(path))
    }
}
