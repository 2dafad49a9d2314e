pub mod clock;
pub mod device;
pub mod prompt;
pub mod transport;

pub use crate::traits::clock::{Clock, SystemClock};
pub use crate::traits::device::{LocationSource, SensorSource};
pub use crate::traits::prompt::UserPrompt;
pub use crate::traits::transport::{TransportError, UploadTransport};
