//! Grab runs: fetch, map and serialize
//!
//! Channels and days are fetched one after the other; the listings server is
//! never hit with parallel requests.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};

use crate::api::ListingSource;
use crate::config::save_channels;
use crate::error::Result;
use crate::feed::{parse_channel_list, parse_records};
use crate::guide::{ProgramMapper, XmltvDocument};
use crate::wizard::select_channels;

/// Build the guide for `channels` (XMLTV ids) over `dates`.
///
/// Any fetch, record or time error aborts the whole run: a partial guide is
/// never returned.
pub fn grab<S: ListingSource>(
    source: &S,
    mapper: &ProgramMapper,
    channels: &[String],
    dates: &[NaiveDate],
) -> Result<XmltvDocument> {
    let mut doc = XmltvDocument::new();

    for date in dates {
        for channel_id in channels {
            info!("Fetching {} for {}", channel_id, date);
            let body = source.fetch_programs(channel_id, *date)?;
            let records = parse_records(&body)?;
            debug!("{} records for {} on {}", records.len(), channel_id, date);

            for record in &records {
                doc.add_channel(ProgramMapper::channel(record));
                doc.add_program(mapper.map(record)?);
            }
        }
    }

    info!(
        "Grabbed {} programs on {} channels",
        doc.programs().len(),
        doc.channels().len()
    );
    Ok(doc)
}

/// Write the document to `output`, or to standard output when None
pub fn write_document(doc: &XmltvDocument, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            doc.write_to(BufWriter::new(file))
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            doc.write_to(&mut lock)?;
            lock.flush()?;
            Ok(())
        }
    }
}

/// Fetch the channel list, ask which channels to keep and save the answer.
/// Returns the number of selected channels.
pub fn configure<S: ListingSource, R: BufRead, W: Write>(
    source: &S,
    config_file: &Path,
    input: R,
    output: W,
) -> Result<usize> {
    let available = parse_channel_list(&source.fetch_channels()?);
    debug!("{} channels available", available.len());

    let selected = select_channels(&available, input, output)?;
    save_channels(config_file, &selected)?;
    info!("Saved {} channels to {}", selected.len(), config_file.display());
    Ok(selected.len())
}
