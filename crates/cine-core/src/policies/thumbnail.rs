//! Post thumbnail resolution
//!
//! Priority: first image attachment, then the first `<img src="...">` in the
//! body, then nothing. An attachment is an image when its file name, or its
//! URL path without query and fragment, ends in an image extension.

use std::sync::LazyLock;

use regex::Regex;

use crate::entities::PostAttachment;

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("img src pattern is valid")
});

fn has_image_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn url_path(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

fn is_image(attachment: &PostAttachment) -> bool {
    has_image_extension(&attachment.file_name)
        || has_image_extension(url_path(&attachment.file_url))
}

/// Pick the thumbnail URL for a post
pub fn resolve_thumbnail(attachments: &[PostAttachment], content: &str) -> Option<String> {
    attachments
        .iter()
        .find(|a| is_image(a))
        .map(|a| a.file_url.clone())
        .or_else(|| {
            IMG_SRC
                .captures(content)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}
