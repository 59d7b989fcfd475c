//! Data models for EduSpace entities.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `Classroom`, `ClassroomResource`: spaces and their equipment
//! - `SharedSpace`, `Reservation`: bookable areas
//! - `BreakdownReport`: equipment failure reports
//! - `Meeting`: administrator-scheduled meetings with teachers
//! - `SignUpRequest`, `RegisterTeacher`: registration payloads with their
//!   validation contract
//! - `TeacherProfile`, `AdministratorProfile`: personal-data records

pub mod classroom;
pub mod meeting;
pub mod profile;
pub mod registration;
pub mod report;
pub mod reservation;
pub mod shared_space;

pub use classroom::{Classroom, ClassroomResource};
pub use meeting::Meeting;
pub use profile::{AdministratorProfile, TeacherProfile};
pub use registration::{RegisterTeacher, SignUpRequest};
pub use report::BreakdownReport;
pub use reservation::Reservation;
pub use shared_space::SharedSpace;
