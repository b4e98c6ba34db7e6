use chrono::Utc;
use common::storage::{StorageError, UploadStore};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use tracing::{debug, info, warn};

use super::error::RecordError;
use crate::entity::student;
use crate::models::student::{StudentFields, gallery_paths};
use crate::upload::{StagedUpload, StoredFile, UploadBatch, UploadField};

/// Parse the `removeGalleryImages` form value: a JSON array of stored paths.
pub fn parse_removal_list(raw: &str) -> Result<Vec<String>, RecordError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| {
        RecordError::Validation(format!(
            "removeGalleryImages must be a JSON array of strings: {e}"
        ))
    })
}

/// Attachment paths produced by one request, grouped by record slot.
#[derive(Debug, Default)]
struct Attachments {
    profile_picture: Option<String>,
    concept_note: Option<String>,
    research_proposal: Option<String>,
    thesis_report: Option<String>,
    gallery: Vec<String>,
}

impl Attachments {
    fn from_stored(files: Vec<StoredFile>) -> Self {
        let mut attachments = Self::default();
        for file in files {
            match file.field {
                UploadField::ProfilePicture => attachments.profile_picture = Some(file.path),
                UploadField::ConceptNote => attachments.concept_note = Some(file.path),
                UploadField::ResearchProposal => attachments.research_proposal = Some(file.path),
                UploadField::ThesisReport => attachments.thesis_report = Some(file.path),
                UploadField::GalleryImages => attachments.gallery.push(file.path),
                UploadField::Misc => {
                    debug!(path = %file.path, "Stored file has no record slot");
                }
            }
        }
        attachments
    }
}

pub struct StudentService<'a, C: ConnectionTrait> {
    conn: &'a C,
    store: &'a dyn UploadStore,
}

impl<'a, C: ConnectionTrait> StudentService<'a, C> {
    pub fn new(conn: &'a C, store: &'a dyn UploadStore) -> Self {
        Self { conn, store }
    }

    /// Store the uploaded files and insert a new record referencing them.
    ///
    /// Files already written stay in place if the insert fails.
    pub async fn create(
        &self,
        fields: StudentFields,
        uploads: Vec<StagedUpload>,
    ) -> Result<student::Model, RecordError> {
        if let Some(name) = fields.missing_required() {
            return Err(RecordError::Validation(format!("{name} is required")));
        }
        let email = fields.email.clone().unwrap_or_default();

        let stored = UploadBatch::new(self.store)
            .store_all(uploads, &email)
            .await?;
        let attachments = Attachments::from_stored(stored);

        let now = Utc::now();
        let mut model = student::ActiveModel {
            profile_picture: Set(attachments.profile_picture),
            concept_note: Set(attachments.concept_note),
            research_proposal: Set(attachments.research_proposal),
            thesis_report: Set(attachments.thesis_report),
            gallery_images: Set(serde_json::json!(attachments.gallery)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        fields.apply(&mut model);

        let created = model.insert(self.conn).await?;
        info!(id = created.id, email = %created.email, "Created student record");
        Ok(created)
    }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<student::Model>, RecordError> {
        Ok(student::Entity::find()
            .order_by_desc(student::Column::CreatedAt)
            .order_by_desc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn find(&self, id: i32) -> Result<student::Model, RecordError> {
        student::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(RecordError::NotFound(id))
    }

    /// Apply submitted fields and files to an existing record.
    ///
    /// New single-slot files replace (and delete) the previous file. New gallery
    /// images are appended, then every path listed in `remove_gallery` that
    /// belongs to the gallery is deleted and dropped from it.
    pub async fn update(
        &self,
        id: i32,
        fields: StudentFields,
        uploads: Vec<StagedUpload>,
        remove_gallery: Option<&str>,
    ) -> Result<student::Model, RecordError> {
        let existing = self.find(id).await?;
        let removals = remove_gallery
            .map(parse_removal_list)
            .transpose()?
            .unwrap_or_default();

        let email = fields
            .email
            .clone()
            .unwrap_or_else(|| existing.email.clone());
        let stored = UploadBatch::new(self.store)
            .store_all(uploads, &email)
            .await?;
        let attachments = Attachments::from_stored(stored);

        let mut gallery = gallery_paths(&existing.gallery_images);
        gallery.extend(attachments.gallery);

        let mut model = existing.clone().into_active_model();

        if let Some(path) = attachments.profile_picture {
            self.replace_slot(existing.profile_picture.as_deref()).await;
            model.profile_picture = Set(Some(path));
        }
        if let Some(path) = attachments.concept_note {
            self.replace_slot(existing.concept_note.as_deref()).await;
            model.concept_note = Set(Some(path));
        }
        if let Some(path) = attachments.research_proposal {
            self.replace_slot(existing.research_proposal.as_deref()).await;
            model.research_proposal = Set(Some(path));
        }
        if let Some(path) = attachments.thesis_report {
            self.replace_slot(existing.thesis_report.as_deref()).await;
            model.thesis_report = Set(Some(path));
        }

        if !removals.is_empty() {
            let mut kept = Vec::with_capacity(gallery.len());
            for path in gallery {
                if removals.contains(&path) {
                    self.remove_file(&path).await;
                } else {
                    kept.push(path);
                }
            }
            gallery = kept;
        }

        model.gallery_images = Set(serde_json::json!(gallery));
        fields.apply(&mut model);
        model.updated_at = Set(Utc::now());

        let updated = model.update(self.conn).await?;
        info!(id, "Updated student record");
        Ok(updated)
    }

    /// Delete every attachment file, then the record.
    pub async fn delete(&self, id: i32) -> Result<(), RecordError> {
        let existing = self.find(id).await?;

        let singles = [
            existing.profile_picture.as_deref(),
            existing.concept_note.as_deref(),
            existing.research_proposal.as_deref(),
            existing.thesis_report.as_deref(),
        ];
        for path in singles.into_iter().flatten() {
            self.remove_file(path).await;
        }
        for path in gallery_paths(&existing.gallery_images) {
            self.remove_file(&path).await;
        }

        student::Entity::delete_by_id(id).exec(self.conn).await?;
        info!(id, "Deleted student record");
        Ok(())
    }

    async fn replace_slot(&self, previous: Option<&str>) {
        if let Some(path) = previous {
            self.remove_file(path).await;
        }
    }

    /// Delete a stored file. A missing file counts as deleted; other failures are
    /// logged and skipped.
    async fn remove_file(&self, path: &str) {
        match self.store.delete(path).await {
            Ok(true) => debug!(path, "Deleted stored file"),
            Ok(false) => debug!(path, "Stored file already gone"),
            Err(StorageError::InvalidPath(_)) => {
                warn!(path, "Skipping deletion of path outside the upload store")
            }
            Err(e) => warn!(path, error = %e, "Failed to delete stored file"),
        }
    }
}
