use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::extractors::{AppMultipart, AppPath};
use crate::models::student::{DeletedStudent, StudentFields, StudentForm, StudentResponse};
use crate::models::{ApiResponse, ErrorBody};
use crate::records::StudentService;
use crate::state::AppState;
use crate::upload::{FieldCounter, StagedUpload, stage_field};

/// Form field carrying the JSON list of gallery paths to remove.
const REMOVE_GALLERY_FIELD: &str = "removeGalleryImages";

pub fn student_body_limit(max_request_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_request_size)
}

/// A fully read multipart submission. File parts are staged in temp files.
struct Submission {
    fields: StudentFields,
    uploads: Vec<StagedUpload>,
    remove_gallery: Option<String>,
}

/// Read every part of the form before anything is written to the upload store.
async fn read_submission(
    multipart: &mut Multipart,
    max_file_size: u64,
) -> Result<Submission, AppError> {
    let mut fields = StudentFields::default();
    let mut uploads = Vec::new();
    let mut remove_gallery = None;
    let mut counter = FieldCounter::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(empty_name) = field.file_name().map(str::is_empty) {
            // An unfilled file input arrives as a part with an empty filename.
            if empty_name {
                debug!(field = %name, "Skipping empty file input");
                continue;
            }
            uploads.push(stage_field(field, &name, &mut counter, max_file_size).await?);
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
        if name == REMOVE_GALLERY_FIELD {
            remove_gallery = Some(text);
        } else if !fields.set(&name, text)? {
            debug!(field = %name, "Ignoring unknown form field");
        }
    }

    Ok(Submission {
        fields,
        uploads,
        remove_gallery,
    })
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Students",
    operation_id = "createStudent",
    summary = "Create a student record",
    description = "Creates a record from a multipart form. `programType`, `supervisionRole`, \
        `studentName` and `email` are required. Files sent as `profilePicture`, `conceptNote`, \
        `researchProposal`, `thesisReport` and `galleryImages` are stored under their field's \
        directory and referenced by the record. Other file fields are stored under `misc/`.",
    request_body(content = StudentForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Record created", body = ApiResponse<StudentResponse>),
        (status = 400, description = "Malformed form input", body = ErrorBody),
        (status = 500, description = "Upload rejected or persistence failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_student(
    State(state): State<AppState>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<impl IntoResponse, AppError> {
    let submission = read_submission(&mut multipart, state.config.upload.max_file_size).await?;

    let created = StudentService::new(&state.db, &*state.store)
        .create(submission.fields, submission.uploads)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            StudentResponse::from(created),
            "Student record created successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List student records",
    description = "Returns every record, newest first.",
    responses(
        (status = 200, description = "All records", body = ApiResponse<Vec<StudentResponse>>),
        (status = 500, description = "Persistence failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StudentResponse>>>, AppError> {
    let records = StudentService::new(&state.db, &*state.store).list().await?;
    Ok(Json(ApiResponse::ok(
        records.into_iter().map(StudentResponse::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Students",
    operation_id = "getStudent",
    summary = "Get a student record",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "The record", body = ApiResponse<StudentResponse>),
        (status = 404, description = "No record with this ID", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ApiResponse<StudentResponse>>, AppError> {
    let record = StudentService::new(&state.db, &*state.store).find(id).await?;
    Ok(Json(ApiResponse::ok(record.into())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Students",
    operation_id = "updateStudent",
    summary = "Update a student record",
    description = "Fields present in the form overwrite the stored values; absent fields are \
        kept and an empty value clears an optional field. A new single-slot file replaces and \
        deletes the previous one. New gallery images are appended. `removeGalleryImages` is a \
        JSON array of gallery paths to delete.",
    params(("id" = i32, Path, description = "Student ID")),
    request_body(content = StudentForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated record", body = ApiResponse<StudentResponse>),
        (status = 400, description = "Malformed form input or removal list", body = ErrorBody),
        (status = 404, description = "No record with this ID", body = ErrorBody),
        (status = 500, description = "Upload rejected or persistence failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn update_student(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<ApiResponse<StudentResponse>>, AppError> {
    let submission = read_submission(&mut multipart, state.config.upload.max_file_size).await?;

    let updated = StudentService::new(&state.db, &*state.store)
        .update(
            id,
            submission.fields,
            submission.uploads,
            submission.remove_gallery.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::with_message(
        updated.into(),
        "Student record updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Students",
    operation_id = "deleteStudent",
    summary = "Delete a student record",
    description = "Deletes every attachment file of the record, then the record.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Record deleted", body = ApiResponse<DeletedStudent>),
        (status = 404, description = "No record with this ID", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ApiResponse<DeletedStudent>>, AppError> {
    StudentService::new(&state.db, &*state.store)
        .delete(id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        DeletedStudent { id },
        "Student record deleted successfully",
    )))
}
