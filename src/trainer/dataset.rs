//! Housing CSV dataset.

use std::io::Read;
use std::path::Path;

use crate::prelude::*;

pub const AREA_COLUMN: &str = "Area";
pub const BEDROOMS_COLUMN: &str = "Bedrooms";
pub const AGE_COLUMN: &str = "Age";
pub const PRICE_COLUMN: &str = "Price";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    pub area: f64,
    pub bedrooms: f64,
    pub age: f64,
    pub price: f64,
}

impl TrainingSample {
    /// Features in the column order the served model expects.
    pub fn features(&self) -> [f64; 3] {
        [self.area, self.bedrooms, self.age]
    }
}

#[instrument(skip_all, fields(path = ?path.as_ref()))]
pub fn load_samples(path: impl AsRef<Path>) -> Result<Vec<TrainingSample>> {
    let reader = csv::Reader::from_path(path.as_ref())
        .with_context(|| format!("failed to open `{}`", path.as_ref().display()))?;
    read_samples(reader)
}

/// Columns are looked up by header name, extra columns are ignored.
pub fn read_samples<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TrainingSample>> {
    let headers = reader.headers().context("failed to read the header")?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .ok_or_else(|| anyhow!("missing column `{}`, found: {:?}", name, headers))
    };
    let columns = [
        position(AREA_COLUMN)?,
        position(BEDROOMS_COLUMN)?,
        position(AGE_COLUMN)?,
        position(PRICE_COLUMN)?,
    ];

    let mut samples = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record = record.with_context(|| format!("failed to read line {}", line))?;
        let mut values = [0.0; 4];
        for (value, &column) in values.iter_mut().zip(&columns) {
            let field = record
                .get(column)
                .ok_or_else(|| anyhow!("line {}: column #{} is missing", line, column))?;
            *value = field
                .trim()
                .parse()
                .with_context(|| format!("line {}: `{}` is not a number", line, field))?;
        }
        let [area, bedrooms, age, price] = values;
        samples.push(TrainingSample {
            area,
            bedrooms,
            age,
            price,
        });
    }
    debug!(n_samples = samples.len(), "loaded");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(data.as_bytes())
    }

    #[test]
    fn read_samples_ok() -> Result {
        let samples = read_samples(reader("Area,Bedrooms,Age,Price\n100,2,10,30000\n55.5,1,3,12000\n"))?;
        assert_eq!(
            samples,
            [
                TrainingSample {
                    area: 100.0,
                    bedrooms: 2.0,
                    age: 10.0,
                    price: 30000.0,
                },
                TrainingSample {
                    area: 55.5,
                    bedrooms: 1.0,
                    age: 3.0,
                    price: 12000.0,
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn read_samples_by_header_name_ok() -> Result {
        let samples = read_samples(reader("Price,Id,Age,Area,Bedrooms\n500,7,1,2,3\n"))?;
        assert_eq!(samples[0].features(), [2.0, 3.0, 1.0]);
        assert!((samples[0].price - 500.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn read_samples_missing_column_error() {
        let error = read_samples(reader("Area,Age,Price\n1,2,3\n")).unwrap_err();
        assert!(error.to_string().contains("Bedrooms"));
    }

    #[test]
    fn read_samples_bad_number_error() {
        let error = read_samples(reader("Area,Bedrooms,Age,Price\n1,2,3,4\n1,two,3,4\n")).unwrap_err();
        assert!(error.to_string().contains("line 3"));
    }
}
