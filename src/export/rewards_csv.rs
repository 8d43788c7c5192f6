//! CSV export of per-episode training records
//!
//! One row per episode with the columns
//! `episode,total_reward,steps,outcome,epsilon`, ready for plotting the
//! learning curve.

use std::{fs::File, io::Write, path::Path};

use crate::{Error, Result, pipeline::EpisodeRecord};

/// Write episode records as CSV to any writer
pub fn write_rewards<W: Write>(writer: W, records: &[EpisodeRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write episode records to a CSV file
pub fn write_rewards_csv<P: AsRef<Path>>(path: P, records: &[EpisodeRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| Error::io(format!("create rewards CSV {}", path.display()), e))?;
    write_rewards(file, records)
}
