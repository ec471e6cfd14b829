pub mod calendar;
pub mod health;
pub mod selection;
pub mod shifts;
