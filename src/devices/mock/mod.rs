//! Mock devices for hardware-free runs
//!
//! | Component | Mock |
//! |-----------|------|
//! | Wheel motors | [`MockMotorDriver`]: records commands, accumulates pivot time |
//! | Reflectance array | [`MockReflectanceArray`]: settable readings, sweep profile, optional noise |
//! | Clock | [`MockClock`]: manual time |
//! | Operator keys | [`ScriptedInput`]: held-key set |
//!
//! Every mock is `Clone` over shared state: hand one clone to the
//! [`Mission`](crate::mission::Mission) and keep the other to drive or
//! inspect it.

mod clock;
mod input;
mod motor;
pub mod noise;
mod reflectance;

pub use clock::MockClock;
pub use input::ScriptedInput;
pub use motor::{MockMotorDriver, MotorCommand};
pub use noise::NoiseGenerator;
pub use reflectance::MockReflectanceArray;
