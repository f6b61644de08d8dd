use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, thiserror::Error)]
pub enum PracticeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to create record directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete record: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),

    #[error("a client is already registered under {0}")]
    DuplicateRut(String),
    #[error("no client registered under {0}")]
    UnknownClient(String),
    #[error("client {0} still has registered pets")]
    ClientHasPets(String),

    #[error("no pet with id {0}")]
    UnknownPet(String),
    #[error("pet {0} still has booked appointments")]
    PetHasAppointments(String),

    #[error("a practitioner named {0} already exists")]
    DuplicatePractitioner(String),
    #[error("no practitioner named {0}")]
    UnknownPractitioner(String),

    #[error("no appointment with id {0}")]
    UnknownAppointment(String),
    #[error("{practitioner} is already booked on {date} at {slot}")]
    SlotTaken {
        practitioner: String,
        date: NaiveDate,
        slot: NaiveTime,
    },
    #[error("{slot} is outside {practitioner}'s working hours")]
    SlotOutsideSchedule {
        practitioner: String,
        slot: NaiveTime,
    },
}

pub type PracticeResult<T> = std::result::Result<T, PracticeError>;
