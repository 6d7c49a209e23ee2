// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};

/// `/users/1`: a single user object, with fields the model ignores.
pub fn user_leanne() -> Value {
    json!({
        "id": 1,
        "name": "Leanne",
        "username": "Bret",
        "email": "leanne@example.com"
    })
}

/// `/posts?userId=1`: two posts carrying the extra `userId` field.
pub fn posts_a_b() -> Value {
    json!([
        { "userId": 1, "id": 1, "title": "A", "body": "x" },
        { "userId": 1, "id": 2, "title": "B", "body": "y" }
    ])
}

/// A post list where one title is blank.
pub fn posts_with_blank_title() -> Value {
    json!([
        { "userId": 1, "id": 1, "title": "A", "body": "x" },
        { "userId": 1, "id": 2, "title": "   ", "body": "y" },
        { "userId": 1, "id": 3, "title": "C", "body": "z" }
    ])
}

/// `/posts`: the full list used on start-up.
pub fn all_posts() -> Value {
    json!([
        { "userId": 1, "id": 1, "title": "A", "body": "x" },
        { "userId": 1, "id": 2, "title": "B", "body": "y" },
        { "userId": 2, "id": 3, "title": "C", "body": "z" }
    ])
}

/// Neither an object nor an array.
pub fn scalar_payload() -> Value {
    json!("unexpected")
}
