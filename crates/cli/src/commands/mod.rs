pub mod admin;
pub mod marks;
pub mod rounds;
pub mod rubric;
