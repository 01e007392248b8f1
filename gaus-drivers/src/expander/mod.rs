//! I2C GPIO expander drivers

pub mod registers;
pub mod seesaw;
pub mod tft_wing;

pub use registers::{Module, RegisterAddress};
pub use seesaw::{Seesaw, SeesawError};
pub use tft_wing::{Buttons, MiniTftWing};
