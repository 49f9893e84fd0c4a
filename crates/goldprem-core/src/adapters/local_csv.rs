use std::path::PathBuf;

use csv::ReaderBuilder;

use crate::data_source::{
    CapabilitySet, DateRange, Endpoint, PriceSource, SourceError, SourceFuture, SourceId,
};
use crate::domain::{MarketDate, SparseSeries};

/// Local-price series loaded from a directory of KRX CSV exports.
///
/// Each file holds `date,price-per-gram` rows under a header line. Files are
/// read in name order, so a later export wins on overlapping dates. A row
/// that fails to parse (bad date, non-numeric or non-positive price, short
/// row) is discarded and loading continues; an unreadable file is skipped
/// the same way. Only an unreadable directory is an error.
pub struct LocalCsvSource {
    dir: PathBuf,
}

impl LocalCsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load_series(&self, range: DateRange) -> Result<SparseSeries, SourceError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|error| {
            SourceError::unavailable(format!(
                "cannot read csv directory {}: {error}",
                self.dir.display()
            ))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();
        paths.sort();

        let mut series = SparseSeries::new();
        for path in paths {
            let Ok(mut reader) = ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_path(&path)
            else {
                continue;
            };

            for row in reader.records() {
                let Ok(row) = row else { continue };
                let (Some(raw_date), Some(raw_price)) = (row.get(0), row.get(1)) else {
                    continue;
                };
                let Ok(date) = MarketDate::parse(&raw_date.replace('/', "-")) else {
                    continue;
                };
                let Ok(price) = raw_price.replace(',', "").trim().parse::<f64>() else {
                    continue;
                };
                if price > 0.0 && range.contains(date) {
                    series.insert(date, price);
                }
            }
        }

        Ok(series)
    }
}

impl PriceSource for LocalCsvSource {
    fn id(&self) -> SourceId {
        SourceId::LocalCsv
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::only(Endpoint::LocalPrice)
    }

    fn latest(&self, endpoint: Endpoint) -> SourceFuture<'_, f64> {
        Box::pin(async move {
            if endpoint != Endpoint::LocalPrice {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            let series = self.load_series(DateRange::up_to(MarketDate::today_utc()))?;
            series
                .last_date()
                .and_then(|date| series.get(date))
                .ok_or_else(|| SourceError::unavailable("no usable rows in csv exports"))
        })
    }

    fn series(&self, endpoint: Endpoint, range: DateRange) -> SourceFuture<'_, SparseSeries> {
        Box::pin(async move {
            if endpoint != Endpoint::LocalPrice {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            self.load_series(range)
        })
    }
}
