//! Radio user lookup in the RadioID users table.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::RadioUser;

/// One row of the RadioID `user.csv` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserRow {
    #[serde(rename = "RADIO_ID")]
    radio_id: String,
    #[serde(rename = "CALLSIGN")]
    callsign: String,
    #[serde(rename = "FIRST_NAME")]
    first_name: String,
    #[serde(rename = "LAST_NAME")]
    last_name: String,
    #[serde(rename = "CITY")]
    city: String,
    #[serde(rename = "STATE")]
    state: String,
    #[serde(rename = "COUNTRY")]
    country: String,
}

impl UserRow {
    fn into_user(self, radio_id: u32) -> RadioUser {
        RadioUser {
            radio_id,
            callsign: self.callsign.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }
}

/// Scan a users table for an exact radio ID match.
///
/// Returns `Ok(None)` when no row matches.
///
/// # Errors
///
/// Returns an error if the data is not valid CSV.
///
/// # Examples
///
/// ```
/// use codeplug::identity::lookup_in_reader;
///
/// let csv = "RADIO_ID,CALLSIGN,FIRST_NAME,LAST_NAME,CITY,STATE,COUNTRY\n\
///            2351234,M0ABC,Alex,Smith,London,,United Kingdom\n";
/// let user = lookup_in_reader(csv.as_bytes(), 2351234).unwrap().unwrap();
/// assert_eq!(user.callsign, "M0ABC");
/// ```
pub fn lookup_in_reader<R: io::Read>(reader: R, radio_id: u32) -> Result<Option<RadioUser>> {
    let wanted = radio_id.to_string();
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    for row in reader.deserialize::<UserRow>() {
        let row = row?;
        if row.radio_id.trim() == wanted {
            return Ok(Some(row.into_user(radio_id)));
        }
    }
    Ok(None)
}

/// Look up a radio ID in a users file.
///
/// # Errors
///
/// Returns [`Error::RadioUserNotFound`] when the ID is absent, or an I/O or
/// CSV error when the file cannot be read.
pub fn lookup_radio_user(path: &Path, radio_id: u32) -> Result<RadioUser> {
    let file = File::open(path)?;
    lookup_in_reader(file, radio_id)?.ok_or_else(|| Error::RadioUserNotFound {
        radio_id,
        path: path.to_path_buf(),
    })
}
