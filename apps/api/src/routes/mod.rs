pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, get_service, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::accounts::handlers as accounts;
use crate::feedback::handlers as feedback;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let upload_dir = state.config.upload_dir.clone();

    // Multipart routes get the configurable upload ceiling instead of axum's 2 MiB default.
    let upload_routes = Router::new()
        .route("/upload", post(feedback::handle_upload))
        .route("/upload-career", post(feedback::handle_upload_career))
        .route("/upload-file", post(feedback::handle_upload_file))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    Router::new()
        .route("/health", get(health::health_handler))
        // Feedback
        .route(
            "/ask",
            post(feedback::handle_ask)
                .get_service(ServeFile::new(static_dir.join("ask").join("index.html"))),
        )
        .merge(upload_routes)
        // Accounts
        .route("/signup", post(accounts::handle_signup))
        .route("/signin", post(accounts::handle_signin))
        .route("/profile", get(accounts::handle_profile))
        .route(
            "/auth",
            get_service(ServeFile::new(static_dir.join("auth.html"))),
        )
        // Static content
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .nest_service(
            "/career-path",
            ServeDir::new(static_dir.join("career-path")),
        )
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::accounts::store::MemoryAccountStore;
    use crate::auth::{SessionGuard, TOKEN_TTL_SECS};
    use crate::config::Config;
    use crate::llm_client::fake::RecordingFeedback;

    const BOUNDARY: &str = "resume-feedback-test-boundary";

    struct Harness {
        router: Router,
        feedback: Arc<RecordingFeedback>,
        sessions: SessionGuard,
        upload_dir: PathBuf,
        _dir: TempDir,
    }

    fn harness_with(feedback: RecordingFeedback) -> Harness {
        harness_configured(feedback, |_| {})
    }

    fn harness_configured(
        feedback: RecordingFeedback,
        configure: impl FnOnce(&mut Config),
    ) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");
        let static_dir = dir.path().join("public");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("auth.html"), "<h1>Sign in</h1>").unwrap();

        let mut config = Config::for_tests(upload_dir.clone(), static_dir);
        configure(&mut config);
        let sessions = SessionGuard::new(config.jwt_secret.as_bytes());
        let feedback = Arc::new(feedback);

        let state = AppState {
            accounts: Arc::new(MemoryAccountStore::default()),
            feedback: feedback.clone(),
            sessions: sessions.clone(),
            config,
        };

        Harness {
            router: build_router(state),
            feedback,
            sessions,
            upload_dir,
            _dir: dir,
        }
    }

    fn harness() -> Harness {
        harness_with(RecordingFeedback::replying("1, 2, 3 GREEN"))
    }

    enum Part<'a> {
        File(&'a str, &'a [u8]),
        Text(&'a str, &'a str),
    }

    fn multipart(uri: &str, parts: &[Part]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File(filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(h: &Harness, request: Request<Body>) -> Response {
        h.router.clone().oneshot(request).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    /// Single-page PDF drawing `text` in Helvetica, with a correct xref table.
    fn one_page_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, object) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        pdf.extend_from_slice(
            format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
        );
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    fn signup_body(email: &str) -> Value {
        json!({
            "name": "Ada",
            "surname": "Lovelace",
            "dob": "1815-12-10",
            "email": email,
            "password": "analytical-engine",
            "specialization": "Software Engineer"
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Feedback
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_upload_without_file_is_rejected() {
        let h = harness();
        let response = send(&h, multipart("/upload", &[Part::Text("note", "hi")])).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "No file uploaded.");
        assert!(h.feedback.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_non_pdf_uploads_are_rejected_without_calling_the_llm() {
        let h = harness();
        let cases = [
            ("/upload", "resume.doc", "DOC/DOCX files are not supported yet."),
            ("/upload", "resume.DOCX", "DOC/DOCX files are not supported yet."),
            ("/upload", "resume.txt", "Unsupported file type. Please upload a PDF."),
            ("/upload", "resume", "Unsupported file type. Please upload a PDF."),
            ("/upload-career", "resume.docx", "DOC/DOCX files are not supported yet."),
            ("/upload-career", "resume.png", "Unsupported file type. Please upload a PDF."),
        ];

        for (uri, filename, expected) in cases {
            let response = send(
                &h,
                multipart(
                    uri,
                    &[
                        Part::Text("careerPath", "Web Developer"),
                        Part::File(filename, b"not really a document"),
                    ],
                ),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} {filename}");
            let body = body_json(response).await;
            assert_eq!(body["error"]["message"], expected);
        }

        assert!(h.feedback.prompts().is_empty());
        assert_eq!(file_count(&h.upload_dir), 0);
    }

    #[tokio::test]
    async fn test_upload_sends_pdf_text_with_checklist_and_cleans_up() {
        let h = harness();
        let pdf = one_page_pdf("Experienced in React");
        let response = send(&h, multipart("/upload", &[Part::File("resume.pdf", &pdf)])).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"message": "1, 2, 3 GREEN"}));

        let prompts = h.feedback.prompts();
        assert_eq!(prompts.len(), 1);
        let user = &prompts[0].user;
        assert!(user.starts_with(crate::feedback::checklists::RESUME_CHECKLIST));
        assert!(user.contains("Resume Text:"));
        assert!(user.contains("Experienced in React"));
        assert_eq!(file_count(&h.upload_dir), 0);
    }

    #[tokio::test]
    async fn test_upload_career_uses_the_career_checklist() {
        let h = harness();
        let pdf = one_page_pdf("Experienced in React");
        let response = send(
            &h,
            multipart(
                "/upload-career",
                &[
                    Part::Text("careerPath", "Web Developer"),
                    Part::File("resume.pdf", &pdf),
                ],
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let prompts = h.feedback.prompts();
        assert_eq!(prompts.len(), 1);
        let user = &prompts[0].user;
        assert!(user.contains("Web developer:"));
        assert!(user.contains("Experienced in React"));
        assert_eq!(file_count(&h.upload_dir), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_payload_too_large() {
        let h = harness_configured(RecordingFeedback::replying("unused"), |config| {
            config.max_upload_bytes = 1024;
        });
        let big = vec![b'a'; 8 * 1024];
        let response = send(&h, multipart("/upload", &[Part::File("resume.pdf", &big)])).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(h.feedback.prompts().is_empty());
        assert_eq!(file_count(&h.upload_dir), 0);
    }

    #[tokio::test]
    async fn test_file_part_without_filename_is_not_a_file() {
        let h = harness();
        let response = send(&h, multipart("/upload", &[Part::Text("file", "just text")])).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["message"], "No file uploaded.");
        assert!(h.feedback.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_pdf_is_a_server_error_and_cleans_up() {
        let h = harness();
        let response = send(
            &h,
            multipart("/upload", &[Part::File("resume.pdf", b"garbage, not a pdf")]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            "An error occurred while processing the file."
        );
        assert!(h.feedback.prompts().is_empty());
        assert_eq!(file_count(&h.upload_dir), 0);
    }

    #[tokio::test]
    async fn test_upload_career_requires_career_path() {
        let h = harness();
        let response = send(
            &h,
            multipart("/upload-career", &[Part::File("resume.pdf", b"%PDF-1.4")]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "careerPath is required.");
        assert!(h.feedback.prompts().is_empty());
        assert_eq!(file_count(&h.upload_dir), 0);
    }

    #[tokio::test]
    async fn test_upload_file_keeps_and_serves_the_file() {
        let h = harness();
        let response = send(
            &h,
            multipart("/upload-file", &[Part::File("notes.txt", b"hello uploads")]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "File uploaded successfully!");
        let file_path = body["filePath"].as_str().unwrap().to_string();
        assert!(file_path.starts_with("/uploads/"));
        assert!(file_path.ends_with(".txt"));
        assert_eq!(file_count(&h.upload_dir), 1);

        let served = send(&h, get_request(&file_path, None)).await;
        assert_eq!(served.status(), StatusCode::OK);
        assert_eq!(body_bytes(served).await, b"hello uploads");
    }

    #[tokio::test]
    async fn test_ask_passes_question_through() {
        let h = harness_with(RecordingFeedback::replying("Keep it to one page."));
        let question = "How long should my resume be?";
        let response = send(&h, json_request("POST", "/ask", json!({ "question": question }))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"message": "Keep it to one page."}));

        let prompts = h.feedback.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].user, question);
    }

    #[tokio::test]
    async fn test_ask_requires_question() {
        let h = harness();
        for body in [json!({}), json!({"question": ""}), json!({"question": "   "})] {
            let response = send(&h, json_request("POST", "/ask", body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
        assert!(h.feedback.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_llm_failure_is_a_generic_server_error() {
        let h = harness_with(RecordingFeedback::failing());
        let response = send(&h, json_request("POST", "/ask", json!({"question": "Hi?"}))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(!body.to_string().contains("service unavailable"));
    }

    // ────────────────────────────────────────────────────────────────────────
    // Accounts
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_signup_then_duplicate_signup() {
        let h = harness();

        let response = send(&h, json_request("POST", "/signup", signup_body("ada@example.com"))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_bytes(response).await, b"User created successfully");

        let response = send(&h, json_request("POST", "/signup", signup_body("ada@example.com"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PERSISTENCE_ERROR");
    }

    #[tokio::test]
    async fn test_signup_with_missing_field_is_rejected() {
        let h = harness();
        let mut body = signup_body("ada@example.com");
        body.as_object_mut().unwrap().remove("surname");

        let response = send(&h, json_request("POST", "/signup", body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "All fields are required."
        );
    }

    #[tokio::test]
    async fn test_signin_and_profile() {
        let h = harness();
        send(&h, json_request("POST", "/signup", signup_body("ada@example.com"))).await;

        let response = send(
            &h,
            json_request(
                "POST",
                "/signin",
                json!({"email": "ada@example.com", "password": "analytical-engine"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"].as_str().unwrap().to_string();

        let response = send(&h, get_request("/profile", Some(&format!("Bearer {token}")))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Welcome to your profile");
        assert_eq!(body["user"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_signin_with_wrong_password() {
        let h = harness();
        send(&h, json_request("POST", "/signup", signup_body("ada@example.com"))).await;

        let response = send(
            &h,
            json_request(
                "POST",
                "/signin",
                json!({"email": "ada@example.com", "password": "wrong"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_token_states() {
        let h = harness();
        let expired = h
            .sessions
            .issue_at(
                "ada@example.com",
                chrono::Utc::now().timestamp() - TOKEN_TTL_SECS - 10,
            )
            .unwrap();

        let cases = [
            (None, StatusCode::UNAUTHORIZED),
            (Some("Bearer".to_string()), StatusCode::UNAUTHORIZED),
            (Some("Bearer not-a-token".to_string()), StatusCode::FORBIDDEN),
            (Some(format!("Bearer {expired}")), StatusCode::FORBIDDEN),
        ];

        for (authorization, expected) in cases {
            let response = send(&h, get_request("/profile", authorization.as_deref())).await;
            assert_eq!(response.status(), expected, "{authorization:?}");
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Static and health
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_auth_page_is_served() {
        let h = harness();
        let response = send(&h, get_request("/auth", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"<h1>Sign in</h1>");
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let response = send(&h, get_request("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }
}
