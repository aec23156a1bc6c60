//! response bodies shaped like the backend's, every selected field present

use serde_json::{json, Value};

pub(crate) fn user_json(user_id: &str, username: &str) -> Value {
    json!({
        "userId": user_id,
        "username": username,
        "userStatus": "ACTIVE",
        "privacyStatus": "PUBLIC",
        "fullName": null,
        "bio": null,
        "email": null,
        "phoneNumber": null,
        "photo": null,
        "followedStatus": "SELF",
        "followerStatus": "SELF",
        "blockedStatus": "SELF",
        "blockerStatus": "SELF",
        "followerCount": 0,
        "followedCount": 0,
        "postCount": 0,
        "signedUpAt": "2024-05-01T10:00:00.000Z"
    })
}

pub(crate) fn post_status_json(post_id: &str, status: &str) -> Value {
    json!({
        "postId": post_id,
        "postStatus": status,
        "postType": "IMAGE",
        "image": null
    })
}
