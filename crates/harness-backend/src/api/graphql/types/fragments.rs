use super::{
    enums::{
        BlockStatus, CardNotificationType, ChatMessageNotificationType, ChatType, FollowStatus, LikeStatus,
        NotificationType, PostStatus, PostType, PrivacyStatus, UserStatus,
    },
    scalars::{DateTime, Email, PhoneNumber},
    schema,
};
use url::Url;

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Color")]
pub struct ColorFragment {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Image")]
pub struct ImageFragment {
    pub url: Url,
    pub url4k: Option<Url>,
    pub url1080p: Option<Url>,
    pub url480p: Option<Url>,
    pub url64p: Option<Url>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub colors: Option<Vec<ColorFragment>>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "User")]
pub struct UserFragment {
    pub user_id: cynic::Id,
    pub username: String,
    pub user_status: Option<UserStatus>,
    pub privacy_status: Option<PrivacyStatus>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub email: Option<Email>,
    pub phone_number: Option<PhoneNumber>,
    pub photo: Option<ImageFragment>,
    pub followed_status: Option<FollowStatus>,
    pub follower_status: Option<FollowStatus>,
    pub blocked_status: Option<BlockStatus>,
    pub blocker_status: Option<BlockStatus>,
    pub follower_count: Option<i32>,
    pub followed_count: Option<i32>,
    pub post_count: Option<i32>,
    pub signed_up_at: Option<DateTime>,
}

/// the id and name of a user, used where a full user selection would recurse
#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "User")]
pub struct UserSummaryFragment {
    pub user_id: cynic::Id,
    pub username: String,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Album")]
pub struct AlbumFragment {
    pub album_id: cynic::Id,
    pub owned_by: UserSummaryFragment,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime,
    pub post_count: i32,
    pub art: Option<ImageFragment>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Post")]
pub struct PostFragment {
    pub post_id: cynic::Id,
    pub posted_at: DateTime,
    pub post_type: PostType,
    pub post_status: PostStatus,
    pub posted_by: UserFragment,
    pub text: Option<String>,
    pub image: Option<ImageFragment>,
    pub image_upload_url: Option<Url>,
    pub video_upload_url: Option<Url>,
    pub album: Option<AlbumFragment>,
    pub expires_at: Option<DateTime>,
    pub is_verified: Option<bool>,
    pub likes_disabled: Option<bool>,
    pub comments_disabled: Option<bool>,
    pub comments_count: Option<i32>,
    pub like_status: Option<LikeStatus>,
    pub onymous_like_count: Option<i32>,
    pub anonymous_like_count: Option<i32>,
}

/// the fields needed to follow media processing of a post
#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Post")]
pub struct PostStatusFragment {
    pub post_id: cynic::Id,
    pub post_status: PostStatus,
    pub post_type: PostType,
    pub image: Option<ImageFragment>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Comment")]
pub struct CommentFragment {
    pub comment_id: cynic::Id,
    pub commented_at: DateTime,
    pub commented_by: UserSummaryFragment,
    pub text: String,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Chat")]
pub struct ChatFragment {
    pub chat_id: cynic::Id,
    pub chat_type: ChatType,
    pub name: Option<String>,
    pub created_at: DateTime,
    pub last_message_activity_at: Option<DateTime>,
    pub user_count: Option<i32>,
    pub messages_count: Option<i32>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "TextTaggedUser")]
pub struct TextTaggedUserFragment {
    pub tag: String,
    pub user: UserSummaryFragment,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "ChatMessage")]
pub struct ChatMessageFragment {
    pub message_id: cynic::Id,
    pub chat: ChatFragment,
    pub author_user_id: Option<cynic::Id>,
    pub author: Option<UserSummaryFragment>,
    pub text: String,
    pub text_tagged_users: Vec<TextTaggedUserFragment>,
    pub created_at: DateTime,
    pub last_edited_at: Option<DateTime>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Card")]
pub struct CardFragment {
    pub card_id: cynic::Id,
    pub title: String,
    pub sub_title: Option<String>,
    pub action: String,
    pub thumbnail: Option<ImageFragment>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "PaginatedUsers")]
pub struct PaginatedUsersFragment {
    pub items: Vec<UserFragment>,
    pub next_token: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "PaginatedPosts")]
pub struct PaginatedPostsFragment {
    pub items: Vec<PostFragment>,
    pub next_token: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "PaginatedComments")]
pub struct PaginatedCommentsFragment {
    pub items: Vec<CommentFragment>,
    pub next_token: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "PaginatedChatMessages")]
pub struct PaginatedChatMessagesFragment {
    pub items: Vec<ChatMessageFragment>,
    pub next_token: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "PaginatedCards")]
pub struct PaginatedCardsFragment {
    pub items: Vec<CardFragment>,
    pub next_token: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Notification")]
pub struct NotificationFragment {
    pub user_id: cynic::Id,
    #[cynic(rename = "type")]
    pub kind: NotificationType,
    pub user_chats_with_unviewed_messages_count: Option<i32>,
    pub followed_user_id: Option<cynic::Id>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "ChatMessageNotification")]
pub struct ChatMessageNotificationFragment {
    pub user_id: cynic::Id,
    #[cynic(rename = "type")]
    pub kind: ChatMessageNotificationType,
    pub message: ChatMessageFragment,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "CardNotification")]
pub struct CardNotificationFragment {
    pub user_id: cynic::Id,
    #[cynic(rename = "type")]
    pub kind: CardNotificationType,
    pub card: CardFragment,
}
