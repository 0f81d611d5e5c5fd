//! Page content workflow.
//!
//! Docmost only accepts page content through its markdown import endpoint; the
//! create and update endpoints handle metadata alone. Inline content is staged
//! in a temporary markdown file and uploaded. Replacing the content of an
//! existing page deletes it and imports the new content into the same space
//! and parent, so the page gets a new id. Exports arrive either as plain text
//! or as a ZIP archive holding a single document.

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, error};
use zip::ZipArchive;

use crate::client::{ApiError, DocmostClient};
use crate::confirm::Confirmer;
use crate::endpoints;
use crate::payload::Payload;

pub const ZIP_SIGNATURE: &[u8] = b"PK";
const STAGED_FILE_PREFIX: &str = "docmost-";
const STAGED_FILE_SUFFIX: &str = ".md";

/// Markdown to import: literal text, or an existing file uploaded as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct NewPage {
    pub space_id: String,
    pub title: String,
    pub parent_page_id: Option<String>,
    pub content: PageContent,
}

/// Replacement content for an existing page, with optional metadata changes.
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub page_id: String,
    pub content: PageContent,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub cover_photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    /// The page was deleted and re-imported as `page`.
    Replaced { previous_id: String, page: Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Html,
}

impl ExportFormat {
    pub const NAMES: [&'static str; 2] = ["markdown", "html"];

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Html => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            other => Err(format!("unsupported export format '{}'", other)),
        }
    }
}

/// Prepends `# title` unless the content already opens with a heading.
pub fn with_title_heading(content: &str, title: &str) -> String {
    if title.trim().is_empty() || content.trim_start().starts_with('#') {
        content.to_string()
    } else {
        format!("# {}\n\n{}", title, content)
    }
}

/// Extracts the document from an export response body.
///
/// A ZIP archive yields its first entry; anything else is taken as the
/// document itself. Either way the text must be UTF-8.
pub fn decode_export(bytes: &[u8]) -> Result<String, ApiError> {
    if !bytes.starts_with(ZIP_SIGNATURE) {
        return into_text(bytes.to_vec());
    }

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ApiError::data(format!("invalid export archive: {}", e)))?;
    if archive.len() == 0 {
        return Err(ApiError::data("export archive is empty"));
    }

    let mut entry = archive
        .by_index(0)
        .map_err(|e| ApiError::data(format!("invalid export archive: {}", e)))?;
    debug!("Reading '{}' from export archive", entry.name());

    let mut contents = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut contents)
        .map_err(|e| ApiError::data(format!("failed to read export archive: {}", e)))?;
    into_text(contents)
}

fn into_text(bytes: Vec<u8>) -> Result<String, ApiError> {
    String::from_utf8(bytes)
        .map_err(|e| ApiError::data(format!("exported content is not valid UTF-8: {}", e)))
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn page_id(page: &Value) -> Result<String, ApiError> {
    str_field(page, "id").ok_or_else(|| ApiError::data("import response did not include a page id"))
}

/// Error for a step that failed once the old page was already deleted.
fn after_delete(previous_id: &str, step: &str, error: ApiError) -> ApiError {
    error!("Page {} was deleted but {}", previous_id, step);
    error.with_context(&format!("page '{}' was deleted but {}", previous_id, step))
}

/// File handed to the import endpoint. Staged files are removed on drop.
enum UploadSource {
    Staged(NamedTempFile),
    CallerOwned(PathBuf),
}

impl UploadSource {
    fn path(&self) -> &Path {
        match self {
            UploadSource::Staged(file) => file.path(),
            UploadSource::CallerOwned(path) => path,
        }
    }
}

pub struct PageWorkflow<'a> {
    client: &'a DocmostClient,
    staging_dir: Option<PathBuf>,
}

impl<'a> PageWorkflow<'a> {
    pub fn new(client: &'a DocmostClient) -> Self {
        Self {
            client,
            staging_dir: None,
        }
    }

    /// Stages inline content under `dir` instead of the system temp directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    fn stage(&self, content: &PageContent, title: &str) -> Result<UploadSource, ApiError> {
        let text = match content {
            PageContent::File(path) => {
                std::fs::File::open(path).map_err(|e| {
                    ApiError::data(format!("failed to read {}: {}", path.display(), e))
                })?;
                return Ok(UploadSource::CallerOwned(path.clone()));
            }
            PageContent::Inline(text) => with_title_heading(text, title),
        };

        let staging_error = |e: std::io::Error| {
            ApiError::data(format!("failed to stage page content: {}", e))
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGED_FILE_PREFIX).suffix(STAGED_FILE_SUFFIX);
        let mut file = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(staging_error)?;

        file.write_all(text.as_bytes()).map_err(staging_error)?;
        file.flush().map_err(staging_error)?;
        debug!("Staged page content at {}", file.path().display());
        Ok(UploadSource::Staged(file))
    }

    async fn import(
        &self,
        source: UploadSource,
        space_id: &str,
        parent_page_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let fields = Payload::new()
            .with("spaceId", space_id)
            .with_opt("parentPageId", parent_page_id);
        let result = self
            .client
            .upload_file(endpoints::PAGES_IMPORT.path, source.path(), &fields)
            .await;
        drop(source);
        result
    }

    /// Creates a page from markdown and makes sure it carries `page.title`.
    pub async fn create_with_content(&self, page: &NewPage) -> Result<Value, ApiError> {
        let source = self.stage(&page.content, &page.title)?;
        let imported = self
            .import(source, &page.space_id, page.parent_page_id.as_deref())
            .await?;

        if str_field(&imported, "title").as_deref() == Some(page.title.as_str()) {
            return Ok(imported);
        }

        let id = page_id(&imported)?;
        debug!("Imported page {} has a different title, renaming", id);
        let payload = Payload::new().with("pageId", id).with("title", page.title.as_str());
        self.client.call(&endpoints::PAGES_UPDATE, &payload).await
    }

    /// Replaces the content of a page by deleting and re-importing it.
    ///
    /// Confirmation is asked before any request. The title, icon and cover
    /// photo of the old page carry over unless `update` overrides them.
    pub async fn update_with_content(
        &self,
        update: &ContentUpdate,
        confirmer: &dyn Confirmer,
    ) -> Result<UpdateOutcome, ApiError> {
        let prompt = format!(
            "Replacing the content of page '{}' deletes it and re-imports it with a new id. Continue?",
            update.page_id
        );
        if !confirmer.confirm(&prompt) {
            debug!("Content update of page {} cancelled", update.page_id);
            return Ok(UpdateOutcome::Cancelled);
        }

        let current = self
            .client
            .call(
                &endpoints::PAGES_INFO,
                &Payload::new().with("pageId", update.page_id.as_str()),
            )
            .await?;

        let space_id = str_field(&current, "spaceId")
            .ok_or_else(|| ApiError::data(format!("page '{}' has no space id", update.page_id)))?;
        let parent_page_id = str_field(&current, "parentPageId");
        let title = update
            .title
            .clone()
            .or_else(|| str_field(&current, "title"))
            .unwrap_or_default();
        let icon = update.icon.clone().or_else(|| str_field(&current, "icon"));
        let cover_photo = update
            .cover_photo
            .clone()
            .or_else(|| str_field(&current, "coverPhoto"));

        // a bad local file must fail before the delete
        let source = self.stage(&update.content, &title)?;

        self.client
            .call(
                &endpoints::PAGES_DELETE,
                &Payload::new().with("pageId", update.page_id.as_str()),
            )
            .await?;
        debug!("Deleted page {}, re-importing content", update.page_id);

        let imported = self
            .import(source, &space_id, parent_page_id.as_deref())
            .await
            .map_err(|e| after_delete(&update.page_id, "re-importing its content failed", e))?;
        let new_id = page_id(&imported).map_err(|e| {
            after_delete(&update.page_id, "the re-imported page could not be identified", e)
        })?;

        let mut corrections = Payload::new();
        let wanted = [("title", Some(title)), ("icon", icon), ("coverPhoto", cover_photo)];
        for (key, value) in wanted {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                if str_field(&imported, key).as_deref() != Some(value.as_str()) {
                    corrections.insert(key, value);
                }
            }
        }

        let page = if corrections.is_empty() {
            imported
        } else {
            debug!("Restoring metadata of page {}", new_id);
            let step = format!("restoring the metadata of new page '{}' failed", new_id);
            self.client
                .call(&endpoints::PAGES_UPDATE, &corrections.with("pageId", new_id))
                .await
                .map_err(|e| after_delete(&update.page_id, &step, e))?
        };

        Ok(UpdateOutcome::Replaced {
            previous_id: update.page_id.clone(),
            page,
        })
    }

    pub async fn export(&self, page_id: &str, format: ExportFormat) -> Result<String, ApiError> {
        let payload = Payload::new()
            .with("pageId", page_id)
            .with("format", format.name());
        let bytes = self
            .client
            .fetch_raw(endpoints::PAGES_EXPORT.path, &payload)
            .await?;
        decode_export(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ErrorKind;
    use crate::confirm::AssumeAnswer;
    use httpmock::MockServer;
    use serde_json::json;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn staged_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_heading_is_added_once() {
        assert_eq!(with_title_heading("Body", "Notes"), "# Notes\n\nBody");
        assert_eq!(with_title_heading("  # Own heading\nBody", "Notes"), "  # Own heading\nBody");
        assert_eq!(with_title_heading("Body", ""), "Body");
    }

    #[test]
    fn test_decode_plain_text_export() {
        assert_eq!(decode_export(b"# Title\n\nBody").unwrap(), "# Title\n\nBody");
    }

    #[test]
    fn test_decode_zip_export_takes_first_entry() {
        let archive = zip_with(&[("page.md", &b"# From zip"[..]), ("assets/x.png", &b"\x89PNG"[..])]);
        assert_eq!(decode_export(&archive).unwrap(), "# From zip");
    }

    #[test]
    fn test_decode_empty_archive_is_data_error() {
        let archive = zip_with(&[]);
        let err = decode_export(&archive).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert_eq!(err.to_string(), "export archive is empty");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_export(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("HTML".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[tokio::test]
    async fn test_create_with_content_imports_and_renames() {
        let server = MockServer::start_async().await;
        let import = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/pages/import")
                    .body_includes("# Release Notes")
                    .body_includes("Shipped it")
                    .body_includes("s1");
                then.status(200)
                    .json_body(json!({"data": {"id": "p1", "title": "Untitled"}, "success": true, "status": 200}));
            })
            .await;
        let rename = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/pages/update")
                    .body_includes("pageId=p1")
                    .body_includes("title=Release+Notes");
                then.status(200).json_body(json!({"id": "p1", "title": "Release Notes"}));
            })
            .await;

        let staging = tempfile::tempdir().unwrap();
        let client = DocmostClient::new(server.url("/api"), Some("t".to_string())).unwrap();
        let workflow = PageWorkflow::new(&client).with_staging_dir(staging.path());
        let page = workflow
            .create_with_content(&NewPage {
                space_id: "s1".to_string(),
                title: "Release Notes".to_string(),
                parent_page_id: None,
                content: PageContent::Inline("Shipped it".to_string()),
            })
            .await
            .unwrap();

        import.assert_async().await;
        rename.assert_async().await;
        assert_eq!(page["title"], "Release Notes");
        assert_eq!(staged_files(staging.path()), 0);
    }

    #[tokio::test]
    async fn test_create_with_matching_title_skips_rename() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/import");
                then.status(200).json_body(json!({"id": "p2", "title": "Notes"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/update");
                then.status(500).json_body(json!({"message": "unexpected rename"}));
            })
            .await;

        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(b"# Notes\n").unwrap();

        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let page = PageWorkflow::new(&client)
            .create_with_content(&NewPage {
                space_id: "s1".to_string(),
                title: "Notes".to_string(),
                parent_page_id: Some("parent".to_string()),
                content: PageContent::File(file.path().to_path_buf()),
            })
            .await
            .unwrap();

        assert_eq!(page["id"], "p2");
        assert!(file.path().exists());
    }

    #[tokio::test]
    async fn test_failed_import_still_removes_staged_file() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/import");
                then.status(400).json_body(json!({"message": "Invalid file"}));
            })
            .await;

        let staging = tempfile::tempdir().unwrap();
        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let err = PageWorkflow::new(&client)
            .with_staging_dir(staging.path())
            .create_with_content(&NewPage {
                space_id: "s1".to_string(),
                title: "T".to_string(),
                parent_page_id: None,
                content: PageContent::Inline("x".to_string()),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(staged_files(staging.path()), 0);
    }

    #[tokio::test]
    async fn test_declined_update_sends_nothing() {
        // no mocks: any request would fail with 404
        let server = MockServer::start_async().await;
        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let outcome = PageWorkflow::new(&client)
            .update_with_content(
                &ContentUpdate {
                    page_id: "p1".to_string(),
                    content: PageContent::Inline("new".to_string()),
                    title: None,
                    icon: None,
                    cover_photo: None,
                },
                &AssumeAnswer(false),
            )
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_update_replaces_page_and_restores_metadata() {
        let server = MockServer::start_async().await;
        let info = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/info").body_includes("pageId=old");
                then.status(200).json_body(json!({
                    "id": "old", "title": "Runbook", "spaceId": "s1",
                    "parentPageId": "root", "icon": "📘"
                }));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/delete").body_includes("pageId=old");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;
        let import = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/pages/import")
                    .body_includes("root")
                    .body_includes("# Runbook")
                    .body_includes("v2 steps");
                then.status(200).json_body(json!({"id": "new", "title": "Runbook", "icon": null}));
            })
            .await;
        let restore = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/pages/update")
                    .body_includes("pageId=new")
                    .body_includes("icon=");
                then.status(200).json_body(json!({"id": "new", "title": "Runbook", "icon": "📘"}));
            })
            .await;

        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let outcome = PageWorkflow::new(&client)
            .update_with_content(
                &ContentUpdate {
                    page_id: "old".to_string(),
                    content: PageContent::Inline("v2 steps".to_string()),
                    title: None,
                    icon: None,
                    cover_photo: None,
                },
                &AssumeAnswer(true),
            )
            .await
            .unwrap();

        info.assert_async().await;
        delete.assert_async().await;
        import.assert_async().await;
        restore.assert_async().await;
        match outcome {
            UpdateOutcome::Replaced { previous_id, page } => {
                assert_eq!(previous_id, "old");
                assert_eq!(page["id"], "new");
            }
            UpdateOutcome::Cancelled => panic!("update should not be cancelled"),
        }
    }

    #[tokio::test]
    async fn test_update_reports_lost_page_when_reimport_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/info");
                then.status(200).json_body(json!({"id": "old", "title": "T", "spaceId": "s1"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/delete");
                then.status(200).json_body(json!({}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/import");
                then.status(500).json_body(json!({"message": "Import failed"}));
            })
            .await;

        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let err = PageWorkflow::new(&client)
            .update_with_content(
                &ContentUpdate {
                    page_id: "old".to_string(),
                    content: PageContent::Inline("x".to_string()),
                    title: Some("T".to_string()),
                    icon: None,
                    cover_photo: None,
                },
                &AssumeAnswer(true),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(err.to_string().contains("page 'old' was deleted"));
        assert!(err.to_string().ends_with("Import failed"));
    }

    async fn mock_info_and_delete(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/info");
                then.status(200).json_body(json!({
                    "id": "old", "title": "Runbook", "spaceId": "s1", "icon": "📘"
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/delete");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;
    }

    fn replacement(page_id: &str) -> ContentUpdate {
        ContentUpdate {
            page_id: page_id.to_string(),
            content: PageContent::Inline("v2".to_string()),
            title: None,
            icon: None,
            cover_photo: None,
        }
    }

    #[tokio::test]
    async fn test_update_reports_lost_page_when_import_has_no_id() {
        let server = MockServer::start_async().await;
        mock_info_and_delete(&server).await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/import");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let err = PageWorkflow::new(&client)
            .update_with_content(&replacement("old"), &AssumeAnswer(true))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(err.to_string().starts_with("page 'old' was deleted but"));
        assert!(err.to_string().ends_with("import response did not include a page id"));
    }

    #[tokio::test]
    async fn test_update_reports_lost_page_when_metadata_restore_fails() {
        let server = MockServer::start_async().await;
        mock_info_and_delete(&server).await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/import");
                then.status(200).json_body(json!({"id": "new", "title": "Runbook"}));
            })
            .await;
        let restore = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/update").body_includes("pageId=new");
                then.status(500).json_body(json!({"message": "Update failed"}));
            })
            .await;

        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let err = PageWorkflow::new(&client)
            .update_with_content(&replacement("old"), &AssumeAnswer(true))
            .await
            .unwrap_err();

        restore.assert_async().await;
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(500));
        let message = err.to_string();
        assert!(message.starts_with("page 'old' was deleted but"));
        assert!(message.contains("new page 'new'"));
        assert!(message.ends_with("Update failed"));
    }

    #[tokio::test]
    async fn test_missing_local_file_leaves_page_untouched() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/info");
                then.status(200).json_body(json!({"id": "old", "title": "T", "spaceId": "s1"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/pages/delete");
                then.status(500).json_body(json!({"message": "unexpected delete"}));
            })
            .await;

        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let err = PageWorkflow::new(&client)
            .update_with_content(
                &ContentUpdate {
                    page_id: "old".to_string(),
                    content: PageContent::File(PathBuf::from("/nonexistent/page.md")),
                    title: None,
                    icon: None,
                    cover_photo: None,
                },
                &AssumeAnswer(true),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(err.to_string().contains("/nonexistent/page.md"));
    }

    #[tokio::test]
    async fn test_export_decodes_archive() {
        let server = MockServer::start_async().await;
        let archive = zip_with(&[("Runbook.md", &b"# Runbook\n"[..])]);
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/pages/export")
                    .body_includes("format=markdown")
                    .body_includes("pageId=p1");
                then.status(200)
                    .header("content-type", "application/zip")
                    .body(archive.clone());
            })
            .await;

        let client = DocmostClient::new(server.url("/api"), None).unwrap();
        let text = PageWorkflow::new(&client)
            .export("p1", ExportFormat::Markdown)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "# Runbook\n");
    }
}
