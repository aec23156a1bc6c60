use super::schema;

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Disabled,
    Deleting,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrivacyStatus {
    Public,
    Private,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowStatus {
    NotFollowing,
    Following,
    Requested,
    Denied,
    #[cynic(rename = "SELF")]
    Itself,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockStatus {
    Blocking,
    NotBlocking,
    #[cynic(rename = "SELF")]
    Itself,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostType {
    TextOnly,
    Image,
    Video,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Pending,
    Processing,
    Completed,
    Error,
    Archived,
    Deleting,
}

impl PostStatus {
    /// statuses a post passes through while its media is being processed
    pub const TRANSIENT: [PostStatus; 2] = [PostStatus::Pending, PostStatus::Processing];

    pub fn is_transient(self) -> bool {
        Self::TRANSIENT.contains(&self)
    }
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeStatus {
    NotLiked,
    OnymouslyLiked,
    AnonymouslyLiked,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Heic,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatType {
    Direct,
    Group,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationType {
    UserChatsWithUnviewedMessagesCountChanged,
    UserFeedChanged,
    UserFollowedUsersWithStoriesChanged,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatMessageNotificationType {
    Added,
    Edited,
    Deleted,
}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardNotificationType {
    Added,
    Edited,
    Deleted,
}
