use super::entities::{SchoolClass, Stream, Subject};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct SchoolClassListResponse {
    pub items: Vec<SchoolClass>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct StreamListResponse {
    pub items: Vec<Stream>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/school.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}
