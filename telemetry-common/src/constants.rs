/// Endpoint paths, relative to the configured base URL.
pub const GRAVITY_PATH: &str = "ios_sensor_pack/gravity/";
pub const USER_ACCELERATION_PATH: &str = "ios_sensor_pack/user_acceleration/";
pub const ATTITUDE_PATH: &str = "ios_sensor_pack/attitude/";
pub const MAGNETIC_FIELD_PATH: &str = "ios_sensor_pack/magnetic_field/";
pub const LOCATION_PATH: &str = "ios_sensor_pack/location/";
pub const COMBINED_PATH: &str = "ios_sensor_pack/ios_sensor/";

pub const N_CATEGORIES: usize = 5;
