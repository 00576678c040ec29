//! Hardware collaborator traits

pub mod clock;
pub mod input;
pub mod motor;
pub mod reflectance;

pub use clock::{Clock, SystemClock};
pub use input::OperatorInput;
pub use motor::MotorDriver;
pub use reflectance::ReflectanceSensor;
