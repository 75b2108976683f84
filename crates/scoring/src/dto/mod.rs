pub mod marks;
pub mod round;
