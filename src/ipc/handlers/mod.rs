pub mod attendance;
pub mod core;
pub mod dashboard;
pub mod directory;
pub mod fees;
pub mod grades;
pub mod navigation;
pub mod session;
pub mod staff;
pub mod students;
