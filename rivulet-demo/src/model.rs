// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};

/// Body carried by every row built from a combination.
pub const PLACEHOLDER_BODY: &str = "body";

/// A user record. Unknown JSON fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// A post record. Unknown JSON fields such as `userId` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// One row of the display list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPost {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub body: String,
}

/// Builds the display list for one combination.
///
/// Rows are re-indexed from zero and carry [`PLACEHOLDER_BODY`]. Every row gets
/// the author's name, or none when no user has been seen.
pub fn build_display_posts(author: Option<&User>, posts: &[Post]) -> Vec<DisplayPost> {
    posts
        .iter()
        .enumerate()
        .map(|(index, post)| DisplayPost {
            id: index as u64,
            title: post.title.clone(),
            author: author.map(|user| user.name.clone()),
            body: PLACEHOLDER_BODY.to_string(),
        })
        .collect()
}

// Initial load shows posts verbatim
impl From<Post> for DisplayPost {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: None,
            body: post.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leanne() -> User {
        User {
            id: 1,
            name: "Leanne".to_string(),
        }
    }

    fn posts() -> Vec<Post> {
        vec![
            Post {
                id: 1,
                title: "A".to_string(),
                body: "x".to_string(),
            },
            Post {
                id: 2,
                title: "B".to_string(),
                body: "y".to_string(),
            },
        ]
    }

    #[test]
    fn rows_are_reindexed_with_author_and_placeholder_body() {
        let rows = build_display_posts(Some(&leanne()), &posts());

        assert_eq!(
            rows,
            vec![
                DisplayPost {
                    id: 0,
                    title: "A".to_string(),
                    author: Some("Leanne".to_string()),
                    body: "body".to_string(),
                },
                DisplayPost {
                    id: 1,
                    title: "B".to_string(),
                    author: Some("Leanne".to_string()),
                    body: "body".to_string(),
                },
            ]
        );
    }

    #[test]
    fn rows_without_user_have_no_author() {
        let rows = build_display_posts(None, &posts());

        assert!(rows.iter().all(|row| row.author.is_none()));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let post: Post =
            serde_json::from_str(r#"{"userId":1,"id":7,"title":"t","body":"b"}"#).unwrap();

        assert_eq!(post.id, 7);
    }

    #[test]
    fn initial_rows_keep_original_id_and_body() {
        let row = DisplayPost::from(posts().remove(1));

        assert_eq!(row.id, 2);
        assert_eq!(row.body, "y");
        assert_eq!(row.author, None);
    }

    #[test]
    fn absent_author_is_omitted_from_json() {
        let row = DisplayPost::from(posts().remove(0));

        let json = serde_json::to_value(&row).unwrap();

        assert!(json.get("author").is_none());
    }
}
