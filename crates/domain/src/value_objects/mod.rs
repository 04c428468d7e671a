//! Value Objects - Immutable, identity-less domain primitives

mod classroom;
mod message_id;
mod register;
mod teacher_voice;

pub use classroom::Classroom;
pub use message_id::MessageId;
pub use register::Register;
pub use teacher_voice::TeacherVoice;
