pub mod clock;
pub mod departure;
pub mod event;
pub mod poster;
pub mod title;
