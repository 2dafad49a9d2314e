use crate::constants::{
    ATTITUDE_PATH, COMBINED_PATH, GRAVITY_PATH, LOCATION_PATH, MAGNETIC_FIELD_PATH,
    N_CATEGORIES, USER_ACCELERATION_PATH,
};

/// Kind of reading posted to the collection endpoint.
///
/// # Examples
///
/// ```
/// use telemetry_common::ReadingCategory;
///
/// assert_eq!(ReadingCategory::Gravity.path(), "ios_sensor_pack/gravity/");
/// assert_eq!(ReadingCategory::Combined.path(), "ios_sensor_pack/ios_sensor/");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadingCategory {
    Gravity,
    UserAcceleration,
    Attitude,
    MagneticField,
    Location,
    Combined,
}

impl ReadingCategory {
    /// Categories posted separately when uploading per category.
    pub const SEPARATE: [ReadingCategory; N_CATEGORIES] = [
        ReadingCategory::Gravity,
        ReadingCategory::UserAcceleration,
        ReadingCategory::Attitude,
        ReadingCategory::MagneticField,
        ReadingCategory::Location,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ReadingCategory::Gravity => GRAVITY_PATH,
            ReadingCategory::UserAcceleration => USER_ACCELERATION_PATH,
            ReadingCategory::Attitude => ATTITUDE_PATH,
            ReadingCategory::MagneticField => MAGNETIC_FIELD_PATH,
            ReadingCategory::Location => LOCATION_PATH,
            ReadingCategory::Combined => COMBINED_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_end_with_separator() {
        for category in ReadingCategory::SEPARATE {
            assert!(category.path().ends_with('/'));
            assert!(!category.path().starts_with('/'));
        }
        assert_eq!(ReadingCategory::Combined.path(), "ios_sensor_pack/ios_sensor/");
    }

    #[test]
    fn test_separate_categories_have_distinct_paths() {
        let mut paths: Vec<&str> = ReadingCategory::SEPARATE.iter().map(|c| c.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), N_CATEGORIES);
        assert!(!ReadingCategory::SEPARATE.contains(&ReadingCategory::Combined));
    }
}
