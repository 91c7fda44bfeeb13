use std::fmt::Display;

use serde::Serialize;

use crate::error::Result;
use crate::parser::{Header, Record, Table, parse_float, parse_int};

/// Column names of the full coaster file, in file order.
pub const COASTER_COLUMNS: [&str; 21] = [
    "park_id",
    "theme",
    "rollercoaster_type",
    "custom_design",
    "excitement",
    "excitement_rating",
    "intensity",
    "intensity_rating",
    "nausea",
    "nausea_rating",
    "max_speed",
    "avg_speed",
    "ride_time",
    "ride_length",
    "max_pos_gs",
    "max_neg_gs",
    "max_lateral_gs",
    "total_air_time",
    "drops",
    "highest_drop_height",
    "inversions",
];

/// Typed view over one record. `None` marks a value that did not parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coaster {
    pub park_id: Option<i64>,
    pub theme: String,
    pub rollercoaster_type: String,
    pub custom_design: Option<i64>,

    // ratings
    pub excitement: Option<f64>,
    pub excitement_rating: String,
    pub intensity: Option<f64>,
    pub intensity_rating: String,
    pub nausea: Option<f64>,
    pub nausea_rating: String,

    // ride measurements
    pub max_speed: Option<f64>,
    pub avg_speed: Option<f64>,
    pub ride_time: Option<i64>,
    pub ride_length: Option<i64>,
    pub max_pos_gs: Option<f64>,
    pub max_neg_gs: Option<f64>,
    pub max_lateral_gs: Option<f64>,
    pub total_air_time: Option<f64>,
    pub drops: Option<i64>,
    pub highest_drop_height: Option<i64>,
    pub inversions: Option<i64>,
}

/// Header positions of the coaster columns, resolved once per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoasterColumns([usize; 21]);

impl CoasterColumns {
    /// Looks up every coaster column by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingColumn`] for the first absent column.
    pub fn resolve(header: &Header) -> Result<Self> {
        let mut positions = [0usize; 21];
        for (slot, name) in positions.iter_mut().zip(COASTER_COLUMNS) {
            *slot = header.index_of(name)?;
        }
        Ok(CoasterColumns(positions))
    }
}

impl Coaster {
    pub fn from_record(record: &Record, columns: &CoasterColumns) -> Self {
        let field = |i: usize| record.get(columns.0[i]).unwrap_or("");
        let text = |i: usize| field(i).to_string();
        let float = |i: usize| parse_float(field(i));
        let int = |i: usize| parse_int(field(i));

        Coaster {
            park_id: int(0),
            theme: text(1),
            rollercoaster_type: text(2),
            custom_design: int(3),
            excitement: float(4),
            excitement_rating: text(5),
            intensity: float(6),
            intensity_rating: text(7),
            nausea: float(8),
            nausea_rating: text(9),
            max_speed: float(10),
            avg_speed: float(11),
            ride_time: int(12),
            ride_length: int(13),
            max_pos_gs: float(14),
            max_neg_gs: float(15),
            max_lateral_gs: float(16),
            total_air_time: float(17),
            drops: int(18),
            highest_drop_height: int(19),
            inversions: int(20),
        }
    }

    /// Builds one coaster per record of `table`.
    pub fn from_table(table: &Table) -> Result<Vec<Self>> {
        let columns = CoasterColumns::resolve(table.header())?;
        Ok(table
            .records()
            .iter()
            .map(|record| Coaster::from_record(record, &columns))
            .collect())
    }
}

fn or_none<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

impl Display for Coaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Coaster(rollercoaster_type={:?}, theme={:?}, park_id={}, excitement_rating={:?}, intensity={})",
            self.rollercoaster_type,
            self.theme,
            or_none(&self.park_id),
            self.excitement_rating,
            or_none(&self.intensity),
        )
    }
}
