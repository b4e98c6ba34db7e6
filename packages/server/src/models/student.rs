use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entity::student;
use crate::error::AppError;

/// Date format accepted in forms and returned in responses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum ProgramType {
    Intern,
    #[serde(rename = "BS Project")]
    BsProject,
    #[serde(rename = "MS Thesis")]
    MsThesis,
    #[serde(rename = "PhD Thesis")]
    PhdThesis,
}

impl ProgramType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intern => "Intern",
            Self::BsProject => "BS Project",
            Self::MsThesis => "MS Thesis",
            Self::PhdThesis => "PhD Thesis",
        }
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Intern" => Ok(Self::Intern),
            "BS Project" => Ok(Self::BsProject),
            "MS Thesis" => Ok(Self::MsThesis),
            "PhD Thesis" => Ok(Self::PhdThesis),
            other => Err(AppError::Validation(format!(
                "Invalid programType '{other}': expected one of Intern, BS Project, MS Thesis, PhD Thesis"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum SupervisionRole {
    Supervisor,
    #[serde(rename = "Co-Supervisor")]
    CoSupervisor,
}

impl SupervisionRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Supervisor => "Supervisor",
            Self::CoSupervisor => "Co-Supervisor",
        }
    }
}

impl fmt::Display for SupervisionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupervisionRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Supervisor" => Ok(Self::Supervisor),
            "Co-Supervisor" => Ok(Self::CoSupervisor),
            other => Err(AppError::Validation(format!(
                "Invalid supervisionRole '{other}': expected Supervisor or Co-Supervisor"
            ))),
        }
    }
}

/// Scalar fields taken from a multipart submission.
///
/// `None` means the field was absent and is left untouched on update. For the
/// optional columns, `Some(None)` clears the value (sent as an empty string).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StudentFields {
    pub program_type: Option<ProgramType>,
    pub supervision_role: Option<SupervisionRole>,
    pub student_name: Option<String>,
    pub email: Option<String>,
    pub father_name: Option<Option<String>>,
    pub guardian_name: Option<Option<String>>,
    pub contact_number: Option<Option<String>>,
    pub guardian_contact_number: Option<Option<String>>,
    pub permanent_address: Option<Option<String>>,
    pub current_address: Option<Option<String>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub registration_number: Option<Option<String>>,
    pub semester: Option<Option<String>>,
    pub institution_name: Option<Option<String>>,
    pub institution_address: Option<Option<String>>,
    pub department: Option<Option<String>>,
    pub faculty: Option<Option<String>>,
    pub enrollment_date: Option<Option<NaiveDate>>,
    pub expected_completion_date: Option<Option<NaiveDate>>,
    pub research_title: Option<Option<String>>,
}

fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required_text(name: &str, value: String) -> Result<String, AppError> {
    optional_text(value).ok_or_else(|| AppError::Validation(format!("{name} must not be empty")))
}

fn optional_date(name: &str, value: &str) -> Result<Option<NaiveDate>, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| AppError::Validation(format!("{name} must be a date in YYYY-MM-DD format")))
}

impl StudentFields {
    /// Apply one text part of the form.
    ///
    /// Returns `false` for names that are not student fields; those are ignored.
    pub fn set(&mut self, name: &str, value: String) -> Result<bool, AppError> {
        match name {
            "programType" => self.program_type = Some(value.parse()?),
            "supervisionRole" => self.supervision_role = Some(value.parse()?),
            "studentName" => self.student_name = Some(required_text(name, value)?),
            "email" => self.email = Some(required_text(name, value)?),
            "fatherName" => self.father_name = Some(optional_text(value)),
            "guardianName" => self.guardian_name = Some(optional_text(value)),
            "contactNumber" => self.contact_number = Some(optional_text(value)),
            "guardianContactNumber" => self.guardian_contact_number = Some(optional_text(value)),
            "permanentAddress" => self.permanent_address = Some(optional_text(value)),
            "currentAddress" => self.current_address = Some(optional_text(value)),
            "dateOfBirth" => self.date_of_birth = Some(optional_date(name, &value)?),
            "registrationNumber" => self.registration_number = Some(optional_text(value)),
            "semester" => self.semester = Some(optional_text(value)),
            "institutionName" => self.institution_name = Some(optional_text(value)),
            "institutionAddress" => self.institution_address = Some(optional_text(value)),
            "department" => self.department = Some(optional_text(value)),
            "faculty" => self.faculty = Some(optional_text(value)),
            "enrollmentDate" => self.enrollment_date = Some(optional_date(name, &value)?),
            "expectedCompletionDate" => {
                self.expected_completion_date = Some(optional_date(name, &value)?)
            }
            "researchTitle" => self.research_title = Some(optional_text(value)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Name of the first required field missing for a new record.
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.program_type.is_none() {
            Some("programType")
        } else if self.supervision_role.is_none() {
            Some("supervisionRole")
        } else if self.student_name.is_none() {
            Some("studentName")
        } else if self.email.is_none() {
            Some("email")
        } else {
            None
        }
    }

    /// Copy every present field onto `model`.
    pub fn apply(self, model: &mut student::ActiveModel) {
        if let Some(v) = self.program_type {
            model.program_type = Set(v.as_str().to_string());
        }
        if let Some(v) = self.supervision_role {
            model.supervision_role = Set(v.as_str().to_string());
        }
        if let Some(v) = self.student_name {
            model.student_name = Set(v);
        }
        if let Some(v) = self.email {
            model.email = Set(v);
        }
        if let Some(v) = self.father_name {
            model.father_name = Set(v);
        }
        if let Some(v) = self.guardian_name {
            model.guardian_name = Set(v);
        }
        if let Some(v) = self.contact_number {
            model.contact_number = Set(v);
        }
        if let Some(v) = self.guardian_contact_number {
            model.guardian_contact_number = Set(v);
        }
        if let Some(v) = self.permanent_address {
            model.permanent_address = Set(v);
        }
        if let Some(v) = self.current_address {
            model.current_address = Set(v);
        }
        if let Some(v) = self.date_of_birth {
            model.date_of_birth = Set(v);
        }
        if let Some(v) = self.registration_number {
            model.registration_number = Set(v);
        }
        if let Some(v) = self.semester {
            model.semester = Set(v);
        }
        if let Some(v) = self.institution_name {
            model.institution_name = Set(v);
        }
        if let Some(v) = self.institution_address {
            model.institution_address = Set(v);
        }
        if let Some(v) = self.department {
            model.department = Set(v);
        }
        if let Some(v) = self.faculty {
            model.faculty = Set(v);
        }
        if let Some(v) = self.enrollment_date {
            model.enrollment_date = Set(v);
        }
        if let Some(v) = self.expected_completion_date {
            model.expected_completion_date = Set(v);
        }
        if let Some(v) = self.research_title {
            model.research_title = Set(v);
        }
    }
}

/// Multipart body accepted by create and update. Documentation only; the
/// handlers read the form part by part.
#[allow(dead_code)]
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentForm {
    /// Required on create.
    pub program_type: Option<ProgramType>,
    /// Required on create.
    pub supervision_role: Option<SupervisionRole>,
    /// Required on create.
    pub student_name: Option<String>,
    /// Required on create. Used in stored file names.
    pub email: Option<String>,
    pub father_name: Option<String>,
    pub guardian_name: Option<String>,
    pub contact_number: Option<String>,
    pub guardian_contact_number: Option<String>,
    pub permanent_address: Option<String>,
    pub current_address: Option<String>,
    #[schema(example = "2001-04-17")]
    pub date_of_birth: Option<String>,
    pub registration_number: Option<String>,
    pub semester: Option<String>,
    pub institution_name: Option<String>,
    pub institution_address: Option<String>,
    pub department: Option<String>,
    pub faculty: Option<String>,
    pub enrollment_date: Option<String>,
    pub expected_completion_date: Option<String>,
    pub research_title: Option<String>,
    /// Image file (jpg, jpeg, png, gif, webp).
    #[schema(value_type = Option<String>, format = Binary)]
    pub profile_picture: Option<Vec<u8>>,
    /// Image or document file (adds pdf, doc, docx).
    #[schema(value_type = Option<String>, format = Binary)]
    pub concept_note: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub research_proposal: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub thesis_report: Option<Vec<u8>>,
    /// Up to 50 images, appended to the gallery in order.
    #[schema(value_type = Option<Vec<String>>, format = Binary)]
    pub gallery_images: Option<Vec<Vec<u8>>>,
    /// Update only. JSON array of gallery paths to remove.
    #[schema(example = "[\"gallery/a_b_com_galleryImages_x_1700000000000.png\"]")]
    pub remove_gallery_images: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "MS Thesis")]
    pub program_type: String,
    #[schema(example = "Supervisor")]
    pub supervision_role: String,
    #[schema(example = "Jane Doe")]
    pub student_name: String,
    #[schema(example = "jane@uni.edu")]
    pub email: String,
    pub father_name: Option<String>,
    pub guardian_name: Option<String>,
    pub contact_number: Option<String>,
    pub guardian_contact_number: Option<String>,
    pub permanent_address: Option<String>,
    pub current_address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub registration_number: Option<String>,
    pub semester: Option<String>,
    pub institution_name: Option<String>,
    pub institution_address: Option<String>,
    pub department: Option<String>,
    pub faculty: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub expected_completion_date: Option<NaiveDate>,
    pub research_title: Option<String>,
    #[schema(example = "profile-pictures/jane_uni_edu_profilePicture_photo_1700000000000.jpg")]
    pub profile_picture: Option<String>,
    pub concept_note: Option<String>,
    pub research_proposal: Option<String>,
    pub thesis_report: Option<String>,
    pub gallery_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeletedStudent {
    #[schema(example = 1)]
    pub id: i32,
}

/// Decode the stored gallery column, tolerating anything that is not an array
/// of strings.
pub fn gallery_paths(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        let gallery_images = gallery_paths(&m.gallery_images);
        Self {
            id: m.id,
            program_type: m.program_type,
            supervision_role: m.supervision_role,
            student_name: m.student_name,
            email: m.email,
            father_name: m.father_name,
            guardian_name: m.guardian_name,
            contact_number: m.contact_number,
            guardian_contact_number: m.guardian_contact_number,
            permanent_address: m.permanent_address,
            current_address: m.current_address,
            date_of_birth: m.date_of_birth,
            registration_number: m.registration_number,
            semester: m.semester,
            institution_name: m.institution_name,
            institution_address: m.institution_address,
            department: m.department,
            faculty: m.faculty,
            enrollment_date: m.enrollment_date,
            expected_completion_date: m.expected_completion_date,
            research_title: m.research_title,
            profile_picture: m.profile_picture,
            concept_note: m.concept_note,
            research_proposal: m.research_proposal,
            thesis_report: m.thesis_report,
            gallery_images,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
