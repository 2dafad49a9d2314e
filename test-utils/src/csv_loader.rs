use std::error::Error;

use csv::Reader;
use num_enum::TryFromPrimitive;

use telemetry_common::{Attitude, Location, MagneticField, XYZ};

/// Recorded session shipped with the crate.
pub const RECORDED_READINGS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/test_data/recorded_readings.csv"
);

#[cfg(test)]
const MALFORMED_READINGS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/test_data/malformed_readings.csv"
);

#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum CsvFileColumn {
    Timestamp,
    XGravity,
    YGravity,
    ZGravity,
    XAcceleration,
    YAcceleration,
    ZAcceleration,
    Roll,
    Pitch,
    Yaw,
    XMag,
    YMag,
    ZMag,
    MagAccuracy,
    Longitude,
    Latitude,
    Altitude,
    HorizontalAccuracy,
    VerticalAccuracy,
    Speed,
    Course,
}

pub const N_CSV_COLUMNS: usize = CsvFileColumn::Course as usize + 1;

impl From<CsvFileColumn> for usize {
    fn from(value: CsvFileColumn) -> Self {
        value as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    fn add(&mut self, columns: &[CsvFileColumn]) -> &mut Self {
        self.columns.extend(columns.iter().copied().map(usize::from));
        self
    }

    pub fn add_timestamp(&mut self) -> &mut Self {
        self.add(&[CsvFileColumn::Timestamp])
    }

    pub fn add_gravity(&mut self) -> &mut Self {
        self.add(&[
            CsvFileColumn::XGravity,
            CsvFileColumn::YGravity,
            CsvFileColumn::ZGravity,
        ])
    }

    pub fn add_acceleration(&mut self) -> &mut Self {
        self.add(&[
            CsvFileColumn::XAcceleration,
            CsvFileColumn::YAcceleration,
            CsvFileColumn::ZAcceleration,
        ])
    }

    pub fn add_attitude(&mut self) -> &mut Self {
        self.add(&[CsvFileColumn::Roll, CsvFileColumn::Pitch, CsvFileColumn::Yaw])
    }

    pub fn add_mag(&mut self) -> &mut Self {
        self.add(&[
            CsvFileColumn::XMag,
            CsvFileColumn::YMag,
            CsvFileColumn::ZMag,
            CsvFileColumn::MagAccuracy,
        ])
    }

    pub fn add_location(&mut self) -> &mut Self {
        self.add(&[
            CsvFileColumn::Longitude,
            CsvFileColumn::Latitude,
            CsvFileColumn::Altitude,
            CsvFileColumn::HorizontalAccuracy,
            CsvFileColumn::VerticalAccuracy,
            CsvFileColumn::Speed,
            CsvFileColumn::Course,
        ])
    }

    /// Every column, in file order.
    pub fn add_all(&mut self) -> &mut Self {
        self.add_timestamp()
            .add_gravity()
            .add_acceleration()
            .add_attitude()
            .add_mag()
            .add_location()
    }
}

/// One row of a recorded session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedSample {
    pub timestamp: f64,
    pub gravity: XYZ,
    pub user_acceleration: XYZ,
    pub attitude: Attitude,
    pub magnetic_field: MagneticField,
    pub location: Location,
}

impl TryFrom<Vec<f64>> for RecordedSample {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        if value.len() != N_CSV_COLUMNS {
            return Err(format!(
                "Expected {} columns, got {}",
                N_CSV_COLUMNS,
                value.len()
            ));
        }
        let mut sample = RecordedSample::default();
        for (idx, v) in value.into_iter().enumerate() {
            let column = CsvFileColumn::try_from(idx).map_err(|e| e.to_string())?;
            match column {
                CsvFileColumn::Timestamp => {
                    sample.timestamp = v;
                    sample.location.timestamp = v;
                }
                CsvFileColumn::XGravity => sample.gravity.0.x = v,
                CsvFileColumn::YGravity => sample.gravity.0.y = v,
                CsvFileColumn::ZGravity => sample.gravity.0.z = v,
                CsvFileColumn::XAcceleration => sample.user_acceleration.0.x = v,
                CsvFileColumn::YAcceleration => sample.user_acceleration.0.y = v,
                CsvFileColumn::ZAcceleration => sample.user_acceleration.0.z = v,
                CsvFileColumn::Roll => sample.attitude.roll = v,
                CsvFileColumn::Pitch => sample.attitude.pitch = v,
                CsvFileColumn::Yaw => sample.attitude.yaw = v,
                CsvFileColumn::XMag => sample.magnetic_field.field.0.x = v,
                CsvFileColumn::YMag => sample.magnetic_field.field.0.y = v,
                CsvFileColumn::ZMag => sample.magnetic_field.field.0.z = v,
                CsvFileColumn::MagAccuracy => sample.magnetic_field.accuracy = v,
                CsvFileColumn::Longitude => sample.location.longitude = v,
                CsvFileColumn::Latitude => sample.location.latitude = v,
                CsvFileColumn::Altitude => sample.location.altitude = v,
                CsvFileColumn::HorizontalAccuracy => sample.location.horizontal_accuracy = v,
                CsvFileColumn::VerticalAccuracy => sample.location.vertical_accuracy = v,
                CsvFileColumn::Speed => sample.location.speed = v,
                CsvFileColumn::Course => sample.location.course = v,
            }
        }
        Ok(sample)
    }
}

pub fn load_csv(file_path: &str) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row = record
            .iter()
            .enumerate()
            .map(|(column, s)| {
                s.trim().parse::<f64>().map_err(|e| {
                    format!("Row {} column {}: invalid value {:?}: {}", idx + 1, column, s, e)
                })
            })
            .collect::<Result<Vec<f64>, String>>()?;
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns<T: TryFrom<Vec<f64>>>(
    file_path: &str,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    let data = load_csv(file_path)?;

    let result = data
        .into_iter()
        .map(|rows| {
            columns
                .iter()
                .map(|&i| {
                    rows.get(i)
                        .ok_or_else(|| format!("Column index {} out of bounds", i).into())
                        .copied()
                })
                .collect::<Result<Vec<f64>, Box<dyn Error>>>()
        })
        .collect::<Result<Vec<Vec<f64>>, Box<dyn Error>>>()?
        .into_iter()
        .map(|f64_values| {
            T::try_from(f64_values).map_err(|_| "Failed to convert to T".to_string().into())
        })
        .collect::<Result<Vec<T>, Box<dyn Error>>>()?;

    Ok(result)
}

/// Loads every row of a recorded session.
pub fn load_recorded_samples(file_path: &str) -> Result<Vec<RecordedSample>, Box<dyn Error>> {
    let mut mapper = CsvColumnMapper::new();
    mapper.add_all();
    load_csv_columns::<RecordedSample>(file_path, &mapper.columns())
}
