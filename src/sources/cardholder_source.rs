use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{error, info, warn};

use crate::models::CardholderRecord;
use crate::sources::SourceError;
use crate::stages::CardholderIndex;
use crate::types::RewardPoints;

const KEY_COLUMN: &str = "cardholder_id";
const REWARD_POINTS_COLUMN: &str = "reward_points";

/// Loads the cardholder reference table from a CSV file and indexes it.
///
/// The header row must name `cardholder_id`. `reward_points` is optional and every
/// other column is kept as a pass-through attribute. Empty fields are treated as null.
///
/// # Errors
/// Returns `SourceError` if the file cannot be opened, the header is unreadable or the key column is absent.
pub fn load_cardholders(path: &Path) -> Result<CardholderIndex, SourceError> {
    let file = File::open(path).map_err(|error| SourceError::io(path, error))?;
    let index = read_cardholders(path, file)?;

    if index.is_empty() {
        warn!("No cardholders were loaded from [{}], every transaction will be unmatched", path.display());
    } else {
        info!("Loaded [{}] cardholders with [{}] attribute column(s) from [{}]", index.len(), index.attribute_columns().len(), path.display());
    }

    Ok(index)
}

pub(super) fn read_cardholders<R: Read>(path: &Path, input: R) -> Result<CardholderIndex, SourceError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(input));

    let headers = reader.headers().map_err(|error| SourceError::csv(path, error))?.clone();

    let key_position = headers.iter().position(|header| header == KEY_COLUMN)
        .ok_or_else(|| SourceError::missing_column(path, KEY_COLUMN))?;

    let points_position = headers.iter().position(|header| header == REWARD_POINTS_COLUMN);

    let attribute_columns: Vec<(usize, String)> = headers.iter()
        .enumerate()
        .filter(|(position, _)| *position != key_position && Some(*position) != points_position)
        .map(|(position, header)| (position, header.to_string()))
        .collect();

    let mut records = Vec::new();

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(error) if error.is_io_error() => return Err(SourceError::csv(path, error)),
            Err(error) => {
                error!("Cardholder CSV deserialization error: {error}");
                continue;
            }
        };

        let Some(cardholder_id) = field(&row, key_position) else {
            warn!("Skipping cardholder row without [{KEY_COLUMN}] on line [{}]", row.position().map_or(0, |position| position.line()));
            continue;
        };

        let attributes: BTreeMap<String, Option<String>> = attribute_columns.iter()
            .map(|(position, column)| (column.clone(), field(&row, *position).map(str::to_string)))
            .collect();

        records.push(CardholderRecord {
            cardholder_id: cardholder_id.to_string(),
            reward_points: points_position.and_then(|position| reward_points(&row, position, cardholder_id)),
            attributes
        });
    }

    let columns = attribute_columns.into_iter().map(|(_, column)| column).collect();

    Ok(CardholderIndex::from_records(columns, records))
}

fn field(row: &StringRecord, position: usize) -> Option<&str> {
    row.get(position).filter(|value| !value.is_empty())
}

fn reward_points(row: &StringRecord, position: usize, cardholder_id: &str) -> Option<RewardPoints> {
    let value = field(row, position)?;

    match value.parse() {
        Ok(points) => Some(points),
        Err(error) => {
            warn!("Unreadable [{REWARD_POINTS_COLUMN}] value [{value}] for cardholder [{cardholder_id}]: {error}");
            None
        }
    }
}
