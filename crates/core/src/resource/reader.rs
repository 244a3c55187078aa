use kinload_api::{LoaderError, LoaderResult, Locator};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use zip::ZipArchive;

/// Read the bytes behind a locator.
pub fn read_locator(locator: &Locator) -> LoaderResult<Vec<u8>> {
    match locator {
        Locator::File { path } => {
            fs::read(path).map_err(|e| LoaderError::invalid_resource(locator, e))
        }
        Locator::Archive { archive, entry } => {
            let file = File::open(archive).map_err(|e| LoaderError::invalid_resource(locator, e))?;
            let mut zip = ZipArchive::new(BufReader::new(file))
                .map_err(|e| LoaderError::invalid_resource(locator, e))?;
            let mut item = zip
                .by_name(entry)
                .map_err(|e| LoaderError::invalid_resource(locator, e))?;

            // The declared size comes from the archive and is not trusted.
            let mut bytes = Vec::new();
            item.read_to_end(&mut bytes)
                .map_err(|e| LoaderError::invalid_resource(locator, e))?;
            Ok(bytes)
        }
    }
}
