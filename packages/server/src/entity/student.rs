use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// One of: Intern, BS Project, MS Thesis, PhD Thesis
    pub program_type: String,
    /// One of: Supervisor, Co-Supervisor
    pub supervision_role: String,

    pub student_name: String,
    pub email: String,
    pub father_name: Option<String>,
    pub guardian_name: Option<String>,
    pub contact_number: Option<String>,
    pub guardian_contact_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub permanent_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub current_address: Option<String>,
    pub date_of_birth: Option<Date>,

    pub registration_number: Option<String>,
    pub semester: Option<String>,
    pub institution_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub institution_address: Option<String>,
    pub department: Option<String>,
    pub faculty: Option<String>,
    pub enrollment_date: Option<Date>,
    pub expected_completion_date: Option<Date>,

    #[sea_orm(column_type = "Text", nullable)]
    pub research_title: Option<String>,

    /// Store-relative attachment paths.
    pub profile_picture: Option<String>,
    pub concept_note: Option<String>,
    pub research_proposal: Option<String>,
    pub thesis_report: Option<String>,
    /// Gallery image paths stored as a JSON array of strings, in upload order.
    pub gallery_images: Json,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
