// Post and comment forms with field-level validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::core::GroupId;
use crate::error::{AppError, AppResult, FieldErrors};
use crate::infrastructure::traits::GroupRepository;

const REQUIRED: &str = "This field is required.";
const INVALID_GROUP: &str = "Select a valid choice. That choice is not one of the available choices.";
const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

static IMAGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[^/\\]+\.(png|jpe?g|gif|bmp|webp)$").expect("image pattern is valid")
});

/// Raw post form as submitted. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Set (to any non-blank value) to drop the current image on edit.
    #[serde(default, rename = "image-clear")]
    pub image_clear: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedPost {
    pub text: String,
    pub group_id: Option<GroupId>,
    /// Newly submitted image, if any.
    pub image: Option<String>,
    pub clear_image: bool,
}

impl CleanedPost {
    /// The image an edited post ends up with.
    pub fn resolve_image(&self, current: Option<String>) -> Option<String> {
        match (&self.image, self.clear_image) {
            (Some(image), _) => Some(image.clone()),
            (None, true) => None,
            (None, false) => current,
        }
    }
}

impl PostForm {
    /// Validate every field and collect all errors before failing.
    pub async fn clean<G>(&self, groups: &G) -> AppResult<CleanedPost>
    where
        G: GroupRepository + ?Sized,
    {
        let mut errors = FieldErrors::new();

        let text = self.text.trim();
        if text.is_empty() {
            errors.entry("text".to_string()).or_default().push(REQUIRED.to_string());
        }

        let group_id = match non_blank(&self.group) {
            None => None,
            Some(raw) => {
                let existing = match raw.parse::<i64>() {
                    Ok(id) => groups.get_group(GroupId(id)).await?,
                    Err(_) => None,
                };
                if existing.is_none() {
                    errors
                        .entry("group".to_string())
                        .or_default()
                        .push(INVALID_GROUP.to_string());
                }
                existing.map(|group| group.id)
            }
        };

        let image = non_blank(&self.image).map(str::to_string);
        if let Some(name) = &image {
            if !IMAGE_NAME.is_match(name) {
                errors
                    .entry("image".to_string())
                    .or_default()
                    .push(INVALID_IMAGE.to_string());
            }
        }

        if !errors.is_empty() {
            return Err(AppError::Form(errors));
        }

        Ok(CleanedPost {
            text: text.to_string(),
            group_id,
            image,
            clear_image: non_blank(&self.image_clear).is_some(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    /// The trimmed comment text, or `None` when the form is invalid.
    pub fn clean(&self) -> Option<String> {
        let text = self.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SqliteStore;
    use crate::models::NewGroup;

    async fn store_with_group() -> (SqliteStore, GroupId) {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let group = store
            .create_group(NewGroup {
                title: "Test Group".to_string(),
                slug: "test-group".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        (store, group.id)
    }

    #[tokio::test]
    async fn test_valid_form() {
        let (store, group_id) = store_with_group().await;
        let form = PostForm {
            text: "  hello  ".to_string(),
            group: Some(group_id.to_string()),
            image: Some("photo.JPG".to_string()),
            ..Default::default()
        };
        let cleaned = form.clean(&store).await.unwrap();
        assert_eq!(cleaned.text, "hello");
        assert_eq!(cleaned.group_id, Some(group_id));
        assert_eq!(cleaned.image.as_deref(), Some("photo.JPG"));
    }

    #[tokio::test]
    async fn test_blank_optional_fields() {
        let (store, _) = store_with_group().await;
        let form = PostForm {
            text: "text".to_string(),
            group: Some(String::new()),
            image: Some(" ".to_string()),
            ..Default::default()
        };
        let cleaned = form.clean(&store).await.unwrap();
        assert_eq!(cleaned.group_id, None);
        assert_eq!(cleaned.image, None);
    }

    #[tokio::test]
    async fn test_collects_all_field_errors() {
        let (store, _) = store_with_group().await;
        let form = PostForm {
            text: "   ".to_string(),
            group: Some("999".to_string()),
            image: Some("requirements.txt".to_string()),
            ..Default::default()
        };
        match form.clean(&store).await {
            Err(AppError::Form(errors)) => {
                let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                assert_eq!(fields, vec!["group", "image", "text"]);
                assert_eq!(errors["image"], vec![INVALID_IMAGE.to_string()]);
            }
            other => panic!("expected form errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_image_resolution_on_edit() {
        let (store, _) = store_with_group().await;
        let current = Some("old.png".to_string());

        let keep = PostForm {
            text: "t".to_string(),
            ..Default::default()
        };
        let cleaned = keep.clean(&store).await.unwrap();
        assert_eq!(cleaned.resolve_image(current.clone()), current);

        let clear = PostForm {
            text: "t".to_string(),
            image_clear: Some("on".to_string()),
            ..Default::default()
        };
        let cleaned = clear.clean(&store).await.unwrap();
        assert_eq!(cleaned.resolve_image(current.clone()), None);

        let replace = PostForm {
            text: "t".to_string(),
            image: Some("new.gif".to_string()),
            ..Default::default()
        };
        let cleaned = replace.clean(&store).await.unwrap();
        assert_eq!(cleaned.resolve_image(current), Some("new.gif".to_string()));
    }

    #[test]
    fn test_comment_form() {
        assert_eq!(CommentForm { text: " hi ".to_string() }.clean(), Some("hi".to_string()));
        assert_eq!(CommentForm::default().clean(), None);
    }
}
