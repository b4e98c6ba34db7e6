use reqwest::multipart::Form;
use sea_orm::EntityTrait;
use server::entity::student;

use crate::common::{TestApp, routes, student_form, with_file};

mod create {
    use super::*;

    #[tokio::test]
    async fn creates_record_with_profile_picture() {
        let app = TestApp::spawn().await;

        let form = with_file(student_form("jane@uni.edu"), "profilePicture", "photo.jpg", b"JPEG");
        let res = app.create_student(form).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.data_str("studentName"), Some("Jane Doe"));
        assert_eq!(res.data_str("programType"), Some("MS Thesis"));

        let profile = res.data_str("profilePicture").unwrap();
        let name = profile
            .strip_prefix("profile-pictures/jane_uni_edu_profilePicture_photo_")
            .unwrap_or_else(|| panic!("unexpected path {profile}"));
        let millis = name.strip_suffix(".jpg").unwrap();
        assert!(millis.len() >= 13 && millis.chars().all(|c| c.is_ascii_digit()));
        assert!(app.stored(profile));
    }

    #[tokio::test]
    async fn each_field_accepts_its_extensions() {
        let app = TestApp::spawn().await;
        let cases = [
            ("profilePicture", "p.png", "profile-pictures/"),
            ("conceptNote", "note.pdf", "concept-notes/"),
            ("researchProposal", "proposal.docx", "research-proposals/"),
            ("thesisReport", "thesis.doc", "thesis-reports/"),
            ("galleryImages", "g.webp", "gallery/"),
        ];

        for (i, (field, file, prefix)) in cases.into_iter().enumerate() {
            let form = with_file(student_form(&format!("s{i}@uni.edu")), field, file, b"data");
            let res = app.create_student(form).await;
            assert_eq!(res.status, 201, "{field}: {}", res.text);

            let path = if field == "galleryImages" {
                res.gallery().remove(0)
            } else {
                res.data_str(field).unwrap().to_string()
            };
            assert!(path.starts_with(prefix), "{field}: {path}");
            assert!(app.stored(&path));
        }
    }

    #[tokio::test]
    async fn extension_check_ignores_case() {
        let app = TestApp::spawn().await;
        let form = with_file(student_form("a@b.com"), "thesisReport", "FINAL.PDF", b"pdf");
        let res = app.create_student(form).await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn rejected_extension_writes_nothing() {
        let app = TestApp::spawn().await;
        let rejected = [
            ("profilePicture", "cv.pdf"),
            ("galleryImages", "notes.docx"),
            ("conceptNote", "script.exe"),
            ("thesisReport", "README"),
        ];

        for (field, file) in rejected {
            let form = with_file(student_form("a@b.com"), field, file, b"data");
            let res = app.create_student(form).await;
            assert_eq!(res.status, 500, "{field}/{file}");
            assert_eq!(res.body["success"], false);
            assert!(
                res.body["message"].as_str().unwrap().contains(field),
                "message should name {field}: {}",
                res.text
            );
        }

        assert!(app.all_stored_files().is_empty());
        assert!(app.get(routes::STUDENTS).await.body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejection_after_valid_file_writes_nothing() {
        let app = TestApp::spawn().await;
        let form = with_file(student_form("a@b.com"), "conceptNote", "ok.pdf", b"pdf");
        let form = with_file(form, "profilePicture", "bad.gif.exe", b"exe");

        let res = app.create_student(form).await;

        assert_eq!(res.status, 500);
        assert!(app.all_stored_files().is_empty());
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn_with(|config| config.upload.max_file_size = 1024).await;

        for (field, file) in [("galleryImages", "big.png"), ("thesisReport", "big.pdf")] {
            let form = with_file(student_form("a@b.com"), field, file, &vec![0u8; 2048]);
            let res = app.create_student(form).await;
            assert_eq!(res.status, 500, "{field}");
            assert!(res.body["message"].as_str().unwrap().contains("maximum size"));
        }

        assert!(app.all_stored_files().is_empty());
    }

    #[tokio::test]
    async fn file_at_size_limit_is_accepted() {
        let app = TestApp::spawn_with(|config| config.upload.max_file_size = 1024).await;
        let form = with_file(student_form("a@b.com"), "thesisReport", "r.pdf", &vec![0u8; 1024]);
        assert_eq!(app.create_student(form).await.status, 201);
    }

    #[tokio::test]
    async fn second_profile_picture_in_one_request_is_rejected() {
        let app = TestApp::spawn().await;
        let form = with_file(student_form("a@b.com"), "profilePicture", "a.png", b"1");
        let form = with_file(form, "profilePicture", "b.png", b"2");

        let res = app.create_student(form).await;

        assert_eq!(res.status, 500);
        assert!(app.all_stored_files().is_empty());
    }

    #[tokio::test]
    async fn same_named_gallery_images_get_distinct_paths() {
        let app = TestApp::spawn().await;
        let mut form = student_form("a@b.com");
        for _ in 0..3 {
            form = with_file(form, "galleryImages", "same.png", b"img");
        }

        let res = app.create_student(form).await;

        assert_eq!(res.status, 201);
        let gallery = res.gallery();
        assert_eq!(gallery.len(), 3);
        assert_ne!(gallery[0], gallery[1]);
        assert_ne!(gallery[1], gallery[2]);
        assert_eq!(app.files_in("gallery").len(), 3);
    }

    #[tokio::test]
    async fn unknown_file_field_goes_to_misc_but_is_not_referenced() {
        let app = TestApp::spawn().await;
        let form = with_file(student_form("a@b.com"), "cv", "cv.pdf", b"pdf");

        let res = app.create_student(form).await;

        assert_eq!(res.status, 201);
        assert_eq!(app.files_in("misc").len(), 1);
        assert!(!res.text.contains("misc/"));
    }

    #[tokio::test]
    async fn unfilled_file_input_is_skipped() {
        let app = TestApp::spawn().await;
        let form = with_file(student_form("a@b.com"), "profilePicture", "", b"");
        let form = with_file(form, "galleryImages", "", b"");

        let res = app.create_student(form).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["data"]["profilePicture"].is_null());
        assert!(res.gallery().is_empty());
        assert!(app.all_stored_files().is_empty());
    }

    #[tokio::test]
    async fn missing_required_field_is_bad_request() {
        let app = TestApp::spawn().await;
        let form = Form::new()
            .text("programType", "Intern")
            .text("supervisionRole", "Supervisor")
            .text("email", "a@b.com");

        let res = app.create_student(form).await;

        assert_eq!(res.status, 400);
        assert!(res.body["message"].as_str().unwrap().contains("studentName"));
    }

    #[tokio::test]
    async fn invalid_enum_and_date_are_bad_request() {
        let app = TestApp::spawn().await;

        let res = app
            .create_student(student_form("a@b.com").text("programType", "Postdoc"))
            .await;
        assert_eq!(res.status, 400);

        let res = app
            .create_student(student_form("a@b.com").text("dateOfBirth", "31/12/2000"))
            .await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn optional_fields_round_trip() {
        let app = TestApp::spawn().await;
        let form = student_form("a@b.com")
            .text("supervisionRole", "Co-Supervisor")
            .text("dateOfBirth", "2001-04-17")
            .text("institutionName", "State University")
            .text("researchTitle", "Low-power radios");

        let res = app.create_student(form).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.data_str("supervisionRole"), Some("Co-Supervisor"));
        assert_eq!(res.data_str("dateOfBirth"), Some("2001-04-17"));
        assert_eq!(res.data_str("institutionName"), Some("State University"));
        assert_eq!(res.data_str("researchTitle"), Some("Low-power radios"));
        assert!(res.body["data"]["fatherName"].is_null());
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn get_returns_record() {
        let app = TestApp::spawn().await;
        let id = app.create_student(student_form("a@b.com")).await.id();

        let res = app.get(&routes::student(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.id(), id);
        assert_eq!(res.data_str("email"), Some("a@b.com"));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::student(404)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["success"], false);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request_envelope() {
        let app = TestApp::spawn().await;

        let res = app.get(&format!("{}/abc", routes::STUDENTS)).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["success"], false);
        assert!(res.body["message"].is_string());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = TestApp::spawn().await;
        let first = app.create_student(student_form("a@b.com")).await.id();
        let second = app.create_student(student_form("c@d.com")).await.id();

        let res = app.get(routes::STUDENTS).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![second, first]);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn replacing_profile_picture_deletes_old_file() {
        let app = TestApp::spawn().await;
        let created = app
            .create_student(with_file(student_form("a@b.com"), "profilePicture", "old.png", b"old"))
            .await;
        let old = created.data_str("profilePicture").unwrap().to_string();

        let res = app
            .update_student(
                created.id(),
                with_file(Form::new(), "profilePicture", "new.png", b"new"),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let new = res.data_str("profilePicture").unwrap();
        assert_ne!(new, old);
        assert!(app.stored(new));
        assert!(!app.stored(&old));
        assert_eq!(app.files_in("profile-pictures").len(), 1);
    }

    #[tokio::test]
    async fn gallery_uploads_append_in_order() {
        let app = TestApp::spawn().await;
        let mut form = student_form("a@b.com");
        for name in ["e1.png", "e2.png", "e3.png"] {
            form = with_file(form, "galleryImages", name, b"img");
        }
        let created = app.create_student(form).await;
        let existing = created.gallery();

        let form = with_file(Form::new(), "galleryImages", "n1.jpg", b"img");
        let form = with_file(form, "galleryImages", "n2.jpg", b"img");
        let res = app.update_student(created.id(), form).await;

        assert_eq!(res.status, 200);
        let gallery = res.gallery();
        assert_eq!(gallery.len(), 5);
        assert_eq!(gallery[..3], existing[..]);
        assert!(gallery[3].contains("_n1_"));
        assert!(gallery[4].contains("_n2_"));
        assert!(gallery.iter().all(|p| app.stored(p)));
    }

    #[tokio::test]
    async fn removal_list_deletes_subset() {
        let app = TestApp::spawn().await;
        let mut form = student_form("a@b.com");
        for name in ["g1.png", "g2.png", "g3.png", "g4.png"] {
            form = with_file(form, "galleryImages", name, b"img");
        }
        let created = app.create_student(form).await;
        let gallery = created.gallery();
        let removed = vec![gallery[0].clone(), gallery[2].clone()];

        let form = Form::new().text(
            "removeGalleryImages",
            serde_json::to_string(&removed).unwrap(),
        );
        let res = app.update_student(created.id(), form).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.gallery(), vec![gallery[1].clone(), gallery[3].clone()]);
        for path in &removed {
            assert!(!app.stored(path));
        }
        assert!(app.stored(&gallery[1]));
        assert!(app.stored(&gallery[3]));
    }

    #[tokio::test]
    async fn removal_and_new_images_in_one_update() {
        let app = TestApp::spawn().await;
        let mut form = student_form("a@b.com");
        for name in ["e1.png", "e2.png", "e3.png"] {
            form = with_file(form, "galleryImages", name, b"img");
        }
        let created = app.create_student(form).await;
        let existing = created.gallery();
        let removed = existing[1].clone();

        let form = Form::new().text(
            "removeGalleryImages",
            serde_json::to_string(&[&removed]).unwrap(),
        );
        let form = with_file(form, "galleryImages", "n1.jpg", b"img");
        let form = with_file(form, "galleryImages", "n2.jpg", b"img");
        let res = app.update_student(created.id(), form).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let gallery = res.gallery();
        assert_eq!(gallery.len(), 4);
        assert_eq!(gallery[..2], [existing[0].clone(), existing[2].clone()]);
        assert!(gallery[2].contains("_n1_"));
        assert!(gallery[3].contains("_n2_"));
        assert!(gallery.iter().all(|p| app.stored(p)));
        assert!(!app.stored(&removed));
        assert_eq!(app.files_in("gallery").len(), 4);
    }

    #[tokio::test]
    async fn non_multipart_body_is_bad_request_envelope() {
        let app = TestApp::spawn().await;
        let id = app.create_student(student_form("a@b.com")).await.id();

        let res = app.put_text(&routes::student(id), "studentName=Changed").await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["success"], false);
        let reloaded = app.get(&routes::student(id)).await;
        assert_eq!(reloaded.data_str("studentName"), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn removal_ignores_paths_not_in_gallery() {
        let app = TestApp::spawn().await;
        let form = with_file(student_form("a@b.com"), "thesisReport", "r.pdf", b"pdf");
        let form = with_file(form, "galleryImages", "g.png", b"img");
        let created = app.create_student(form).await;
        let report = created.data_str("thesisReport").unwrap().to_string();

        let removal = serde_json::json!([report, "gallery/unknown.png"]).to_string();
        let res = app
            .update_student(created.id(), Form::new().text("removeGalleryImages", removal))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.gallery(), created.gallery());
        assert!(app.stored(&report));
    }

    #[tokio::test]
    async fn malformed_removal_list_is_bad_request_and_changes_nothing() {
        let app = TestApp::spawn().await;
        let created = app
            .create_student(with_file(student_form("a@b.com"), "galleryImages", "g.png", b"img"))
            .await;

        let form = Form::new()
            .text("studentName", "Changed")
            .text("removeGalleryImages", "gallery/g.png");
        let res = app.update_student(created.id(), form).await;

        assert_eq!(res.status, 400);
        let reloaded = app.get(&routes::student(created.id())).await;
        assert_eq!(reloaded.data_str("studentName"), Some("Jane Doe"));
        assert_eq!(reloaded.gallery(), created.gallery());
        assert!(app.stored(&created.gallery()[0]));
    }

    #[tokio::test]
    async fn scalar_fields_overwrite_and_absent_fields_stay() {
        let app = TestApp::spawn().await;
        let created = app
            .create_student(student_form("a@b.com").text("department", "Physics"))
            .await;

        let form = Form::new()
            .text("programType", "PhD Thesis")
            .text("semester", "3");
        let res = app.update_student(created.id(), form).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.data_str("programType"), Some("PhD Thesis"));
        assert_eq!(res.data_str("semester"), Some("3"));
        assert_eq!(res.data_str("department"), Some("Physics"));
        assert_eq!(res.data_str("studentName"), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found_and_writes_nothing() {
        let app = TestApp::spawn().await;
        let form = with_file(Form::new(), "conceptNote", "n.pdf", b"pdf");

        let res = app.update_student(999, form).await;

        assert_eq!(res.status, 404);
        assert!(app.all_stored_files().is_empty());
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_every_file_and_the_record() {
        let app = TestApp::spawn().await;
        let mut form = student_form("a@b.com");
        form = with_file(form, "profilePicture", "p.png", b"1");
        form = with_file(form, "conceptNote", "c.pdf", b"2");
        form = with_file(form, "researchProposal", "r.docx", b"3");
        form = with_file(form, "thesisReport", "t.pdf", b"4");
        for name in ["g1.png", "g2.png", "g3.png"] {
            form = with_file(form, "galleryImages", name, b"img");
        }
        let created = app.create_student(form).await;
        assert_eq!(app.all_stored_files().len(), 7);

        let res = app.delete(&routes::student(created.id())).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], true);
        assert!(app.all_stored_files().is_empty());
        assert_eq!(app.get(&routes::student(created.id())).await.status, 404);
        let row = student::Entity::find_by_id(created.id() as i32)
            .one(&app.db)
            .await
            .unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn delete_succeeds_when_a_file_is_already_gone() {
        let app = TestApp::spawn().await;
        let created = app
            .create_student(with_file(student_form("a@b.com"), "thesisReport", "t.pdf", b"pdf"))
            .await;
        std::fs::remove_file(
            app.upload_root
                .join(created.data_str("thesisReport").unwrap()),
        )
        .unwrap();

        let res = app.delete(&routes::student(created.id())).await;

        assert_eq!(res.status, 200);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let app = TestApp::spawn().await;
        assert_eq!(app.delete(&routes::student(12)).await.status, 404);
    }
}
